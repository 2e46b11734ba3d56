use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::valuation_traits::ValuationServiceTrait;
use crate::accounts::AccountRepositoryTrait;
use crate::analytics::{
    valued_balances, AllTimeHigh, AllTimeHighAnalyzer, DateRange, ExpenseByCategoryAnalyzer,
    ExpensesByCategory, WealthOverviewAnalyzer, WealthPeriod, WealthPoint,
};
use crate::cache::ProviderCache;
use crate::errors::Result;
use crate::fx::{PriceRepositoryTrait, RateResolver, ValuationConverter};
use crate::ledger::{native_total, AccountBalances, BalanceReplayEngine, LedgerIndex, NativeTotal};
use crate::settings::ValuationSettings;
use crate::transactions::TransactionRepositoryTrait;
use crate::utils::{Clock, SystemClock};

/// Service answering balance and valuation reports.
///
/// Each call takes the current snapshot from the provider cache and runs
/// synchronously over it; concurrent calls share the snapshot.
pub struct ValuationService {
    cache: Arc<ProviderCache>,
    clock: Arc<dyn Clock>,
    settings: ValuationSettings,
}

impl ValuationService {
    pub fn new(cache: Arc<ProviderCache>, clock: Arc<dyn Clock>, settings: ValuationSettings) -> Self {
        Self {
            cache,
            clock,
            settings,
        }
    }

    /// Wires a cache and a wall clock from the settings.
    pub fn from_settings(
        accounts: Arc<dyn AccountRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        prices: Arc<dyn PriceRepositoryTrait>,
        settings: ValuationSettings,
    ) -> Result<Self> {
        let clock = SystemClock::new(settings.tz()?);
        let cache = ProviderCache::new(accounts, transactions, prices, settings.invalidation_policy);
        Ok(Self::new(Arc::new(cache), Arc::new(clock), settings))
    }

    pub fn settings(&self) -> &ValuationSettings {
        &self.settings
    }

    async fn snapshot(&self) -> Result<Arc<LedgerIndex>> {
        self.cache.get_or_build(false).await
    }

    fn converter<'a>(&self, index: &'a LedgerIndex) -> ValuationConverter<'a> {
        ValuationConverter::new(RateResolver::new(index, self.settings.rate_cutoff_date))
    }

    fn target<'a>(&'a self, target_currency: Option<&'a str>) -> &'a str {
        target_currency.unwrap_or(&self.settings.base_currency)
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn compute_balances(&self, as_of: NaiveDate) -> Result<AccountBalances> {
        let index = self.snapshot().await?;
        BalanceReplayEngine::new(&index).compute_balances(as_of)
    }

    async fn valued_balances(
        &self,
        as_of: NaiveDate,
        target_currency: Option<&str>,
    ) -> Result<BTreeMap<String, Decimal>> {
        let index = self.snapshot().await?;
        let balances = BalanceReplayEngine::new(&index).compute_balances(as_of)?;
        valued_balances(
            &index,
            &self.converter(&index),
            &balances,
            self.target(target_currency),
            as_of,
        )
    }

    async fn native_total(
        &self,
        account_ids: &[String],
        as_of: NaiveDate,
    ) -> Result<Option<NativeTotal>> {
        let index = self.snapshot().await?;
        let balances = BalanceReplayEngine::new(&index).compute_balances(as_of)?;
        let selected = account_ids.iter().filter_map(|id| {
            let account = index.account(id);
            if account.is_none() {
                debug!("native_total: ignoring unknown account {}", id);
            }
            account
        });
        native_total(selected, &balances)
    }

    async fn all_time_high(&self, target_currency: Option<&str>) -> Result<AllTimeHigh> {
        let index = self.snapshot().await?;
        AllTimeHighAnalyzer::new(&index, self.converter(&index))
            .compute(self.target(target_currency), self.clock.today())
    }

    async fn wealth_overview(
        &self,
        period: WealthPeriod,
        target_currency: Option<&str>,
    ) -> Result<Vec<WealthPoint>> {
        let index = self.snapshot().await?;
        WealthOverviewAnalyzer::new(&index, self.converter(&index)).compute(
            period,
            self.target(target_currency),
            self.clock.today(),
        )
    }

    async fn expense_by_category(
        &self,
        range: DateRange,
        target_currency: Option<&str>,
    ) -> Result<ExpensesByCategory> {
        let index = self.snapshot().await?;
        ExpenseByCategoryAnalyzer::new(&index, self.converter(&index))
            .compute(range, self.target(target_currency))
    }

    async fn refresh(&self) -> Result<()> {
        self.cache.get_or_build(true).await.map(|_| ())
    }

    fn invalidate(&self) -> Result<()> {
        self.cache.invalidate()
    }
}
