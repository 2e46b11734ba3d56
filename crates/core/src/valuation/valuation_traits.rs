//! Valuation service traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::analytics::{AllTimeHigh, DateRange, ExpensesByCategory, WealthPeriod, WealthPoint};
use crate::errors::Result;
use crate::ledger::{AccountBalances, NativeTotal};

/// Reports over the current ledger snapshot.
///
/// Every `target_currency` argument falls back to the configured base
/// currency when `None`. "Today" comes from the service clock.
#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Native balance of every account at the end of `as_of`.
    async fn compute_balances(&self, as_of: NaiveDate) -> Result<AccountBalances>;

    /// Every account's balance at the end of `as_of`, valued on that day.
    async fn valued_balances(
        &self,
        as_of: NaiveDate,
        target_currency: Option<&str>,
    ) -> Result<BTreeMap<String, Decimal>>;

    /// Unconverted sum of the selected accounts, which must share a currency.
    ///
    /// Unknown ids are ignored. Returns `None` when nothing is selected.
    async fn native_total(
        &self,
        account_ids: &[String],
        as_of: NaiveDate,
    ) -> Result<Option<NativeTotal>>;

    async fn all_time_high(&self, target_currency: Option<&str>) -> Result<AllTimeHigh>;

    async fn wealth_overview(
        &self,
        period: WealthPeriod,
        target_currency: Option<&str>,
    ) -> Result<Vec<WealthPoint>>;

    async fn expense_by_category(
        &self,
        range: DateRange,
        target_currency: Option<&str>,
    ) -> Result<ExpensesByCategory>;

    /// Rebuilds the snapshot regardless of the cache fingerprint.
    async fn refresh(&self) -> Result<()>;

    /// Drops the snapshot so the next report reloads.
    fn invalidate(&self) -> Result<()>;
}
