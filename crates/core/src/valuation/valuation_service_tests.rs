//! Tests for the valuation facade over in-memory repositories.

use super::*;
use crate::accounts::{Account, AccountRepositoryTrait, Balance};
use crate::analytics::{DateRange, WealthPeriod};
use crate::cache::ProviderCache;
use crate::errors::{Error, Result};
use crate::fx::{BtcRatePoint, PriceRepositoryTrait, RatePoint};
use crate::settings::{InvalidationPolicy, ValuationSettings};
use crate::transactions::{Amount, Transaction, TransactionRepositoryTrait};
use crate::utils::FixedClock;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Repositories
// ============================================================================

struct InMemoryLedger {
    accounts: Vec<Account>,
    transactions: Mutex<Vec<Transaction>>,
    fiat_rates: Vec<RatePoint>,
    btc_rates: Vec<BtcRatePoint>,
}

#[async_trait]
impl AccountRepositoryTrait for InMemoryLedger {
    async fn list(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.clone())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for InMemoryLedger {
    async fn list(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.transactions.lock().unwrap().len())
    }
}

#[async_trait]
impl PriceRepositoryTrait for InMemoryLedger {
    async fn list_fiat_rates(&self) -> Result<Vec<RatePoint>> {
        Ok(self.fiat_rates.clone())
    }

    async fn list_btc_rates(&self) -> Result<Vec<BtcRatePoint>> {
        Ok(self.btc_rates.clone())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

/// USD checking, EUR savings and a cold-storage wallet.
fn sample_ledger() -> Arc<InMemoryLedger> {
    Arc::new(InMemoryLedger {
        accounts: vec![
            Account::fiat("checking", "USD", dec!(1000)).with_name("Checking"),
            Account::fiat("savings", "EUR", dec!(900)).with_name("Savings"),
            Account::fiat("travel", "EUR", dec!(90)),
            Account::bitcoin("cold", 1_000_000).with_name("Cold storage"),
        ],
        transactions: Mutex::new(vec![
            Transaction::fiat("t1", day(2), "checking", dec!(-200), "rent"),
            Transaction::transfer(
                "t2",
                day(3),
                "checking",
                Amount::Fiat(dec!(-500)),
                "cold",
                Amount::Sats(1_000_000),
                "savings",
            ),
            Transaction::fiat("t3", day(4), "savings", dec!(-90), "food"),
        ]),
        fiat_rates: vec![RatePoint::new(day(1), "EUR", dec!(0.9))],
        btc_rates: vec![
            BtcRatePoint::new(day(1), dec!(50000)),
            BtcRatePoint::new(day(4), dec!(60000)),
        ],
    })
}

fn service_for(ledger: &Arc<InMemoryLedger>, today: NaiveDate) -> ValuationService {
    let settings = ValuationSettings::default();
    let cache = ProviderCache::new(
        ledger.clone(),
        ledger.clone(),
        ledger.clone(),
        InvalidationPolicy::TransactionCount,
    );
    ValuationService::new(Arc::new(cache), Arc::new(FixedClock(today)), settings)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_compute_balances_replays_ledger() {
    let service = service_for(&sample_ledger(), day(10));

    let balances = service.compute_balances(day(4)).await.unwrap();
    assert_eq!(balances["checking"], Balance::Fiat(dec!(300)));
    assert_eq!(balances["savings"], Balance::Fiat(dec!(810)));
    assert_eq!(balances["cold"], Balance::Sats(2_000_000));
}

#[tokio::test]
async fn test_valued_balances_default_to_base_currency() {
    let service = service_for(&sample_ledger(), day(10));

    let valued = service.valued_balances(day(3), None).await.unwrap();
    assert_eq!(valued["checking"], dec!(300));
    assert_eq!(valued["savings"], dec!(1000));
    assert_eq!(valued["cold"], dec!(1000));

    let in_eur = service.valued_balances(day(3), Some("EUR")).await.unwrap();
    assert_eq!(in_eur["savings"], dec!(900));
}

#[tokio::test]
async fn test_native_total_requires_one_currency() {
    let service = service_for(&sample_ledger(), day(10));

    let eur = service
        .native_total(
            &["savings".to_string(), "travel".to_string(), "gone".to_string()],
            day(4),
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(eur.currency, "EUR");
    assert_eq!(eur.total, Balance::Fiat(dec!(900)));

    let err = service
        .native_total(&["savings".to_string(), "checking".to_string()], day(4))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MixedCurrencyAggregation { .. }));

    assert!(service.native_total(&[], day(4)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_all_time_high_uses_clock() {
    let service = service_for(&sample_ledger(), day(5));

    // day 2: 800 + 1000 + 100 + 500 = 2400
    // day 3: 300 + 1000 + 100 + 1000 = 2400
    // day 4: 300 + 900 + 100 + 1200 = 2500
    let report = service.all_time_high(None).await.unwrap();
    assert_eq!(report.ath_date, day(4));
    assert_eq!(report.ath_value, dec!(2500));
    assert_eq!(report.decline_from_ath_percent, dec!(0));
    assert!(report.has_accounts_without_transactions);
    assert_eq!(report.currency, "USD");
}

#[tokio::test]
async fn test_wealth_overview_and_expenses() {
    let service = service_for(&sample_ledger(), day(5));

    let points = service
        .wealth_overview(WealthPeriod::Daily, None)
        .await
        .unwrap();
    assert_eq!(points.len(), 4);
    assert_eq!(points.last().map(|p| p.btc_total_sats), Some(2_000_000));

    let expenses = service
        .expense_by_category(DateRange::new(day(1), day(31)), Some("EUR"))
        .await
        .unwrap();
    assert_eq!(expenses["rent"], dec!(180));
    assert_eq!(expenses["food"], dec!(90));
    assert!(!expenses.contains_key("savings"));
}

#[tokio::test]
async fn test_refresh_picks_up_same_count_edit() {
    let ledger = sample_ledger();
    let service = service_for(&ledger, day(10));

    let before = service.compute_balances(day(10)).await.unwrap();
    assert_eq!(before["checking"], Balance::Fiat(dec!(300)));

    ledger.transactions.lock().unwrap()[0] =
        Transaction::fiat("t1", day(2), "checking", dec!(-250), "rent");

    let stale = service.compute_balances(day(10)).await.unwrap();
    assert_eq!(stale["checking"], Balance::Fiat(dec!(300)));

    service.refresh().await.unwrap();
    let fresh = service.compute_balances(day(10)).await.unwrap();
    assert_eq!(fresh["checking"], Balance::Fiat(dec!(250)));
}

#[tokio::test]
async fn test_invalidate_forces_reload() {
    let ledger = sample_ledger();
    let service = service_for(&ledger, day(10));
    service.compute_balances(day(10)).await.unwrap();

    ledger.transactions.lock().unwrap()[2] =
        Transaction::fiat("t3", day(4), "savings", dec!(-9), "food");
    service.invalidate().unwrap();

    let balances = service.compute_balances(day(10)).await.unwrap();
    assert_eq!(balances["savings"], Balance::Fiat(dec!(891)));
}

#[tokio::test]
async fn test_missing_rate_surfaces_as_error() {
    let ledger = sample_ledger();
    let service = service_for(&ledger, day(10));

    let err = service
        .valued_balances(day(3), Some("JPY"))
        .await
        .unwrap_err();
    assert!(err.is_rate_not_found());
}

#[tokio::test]
async fn test_from_settings_rejects_bad_timezone() {
    let ledger = sample_ledger();
    let settings = ValuationSettings {
        timezone: "Nowhere/Special".to_string(),
        ..ValuationSettings::default()
    };
    let result = ValuationService::from_settings(ledger.clone(), ledger.clone(), ledger, settings);
    assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
}
