//! Unit tests for the provider cache.

use super::*;
use crate::accounts::{Account, AccountRepositoryTrait};
use crate::errors::{Error, Result};
use crate::fx::{BtcRatePoint, PriceRepositoryTrait, RatePoint};
use crate::settings::InvalidationPolicy;
use crate::transactions::{Amount, Transaction, TransactionRepositoryTrait};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock Repositories
// ============================================================================

#[derive(Default)]
struct MockLedgerStore {
    accounts: Mutex<Vec<Account>>,
    transactions: Mutex<Vec<Transaction>>,
    revision: Mutex<Option<u64>>,
    fail_prices: Mutex<bool>,
    transaction_loads: AtomicUsize,
}

impl MockLedgerStore {
    fn with_ledger() -> Arc<Self> {
        let store = Self::default();
        store
            .accounts
            .lock()
            .unwrap()
            .push(Account::fiat("checking", "USD", dec!(100)));
        store.transactions.lock().unwrap().push(tx("t1", dec!(-10)));
        Arc::new(store)
    }

    fn push(&self, transaction: Transaction) {
        self.transactions.lock().unwrap().push(transaction);
    }

    /// Replaces the first transaction in place; the count does not move.
    fn edit_first(&self, transaction: Transaction) {
        self.transactions.lock().unwrap()[0] = transaction;
    }

    fn set_revision(&self, revision: Option<u64>) {
        *self.revision.lock().unwrap() = revision;
    }

    fn loads(&self) -> usize {
        self.transaction_loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccountRepositoryTrait for MockLedgerStore {
    async fn list(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.lock().unwrap().clone())
    }
}

#[async_trait]
impl TransactionRepositoryTrait for MockLedgerStore {
    async fn list(&self) -> Result<Vec<Transaction>> {
        self.transaction_loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.transactions.lock().unwrap().len())
    }

    async fn revision(&self) -> Result<Option<u64>> {
        Ok(*self.revision.lock().unwrap())
    }
}

#[async_trait]
impl PriceRepositoryTrait for MockLedgerStore {
    async fn list_fiat_rates(&self) -> Result<Vec<RatePoint>> {
        if *self.fail_prices.lock().unwrap() {
            return Err(Error::Repository("price store offline".to_string()));
        }
        Ok(vec![RatePoint::new(day(1), "EUR", dec!(0.9))])
    }

    async fn list_btc_rates(&self) -> Result<Vec<BtcRatePoint>> {
        Ok(vec![BtcRatePoint::new(day(1), dec!(50000))])
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

fn tx(id: &str, amount: Decimal) -> Transaction {
    Transaction::fiat(id, day(2), "checking", amount, "food")
}

fn cache_for(store: &Arc<MockLedgerStore>, policy: InvalidationPolicy) -> ProviderCache {
    ProviderCache::new(store.clone(), store.clone(), store.clone(), policy)
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_unchanged_count_reuses_snapshot() {
    let store = MockLedgerStore::with_ledger();
    let cache = cache_for(&store, InvalidationPolicy::TransactionCount);

    let first = cache.get_or_build(false).await.unwrap();
    let second = cache.get_or_build(false).await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(store.loads(), 1);
    assert_eq!(first.fiat_series("EUR").map(|s| s.len()), Some(1));
}

#[tokio::test]
async fn test_new_transaction_triggers_rebuild() {
    let store = MockLedgerStore::with_ledger();
    let cache = cache_for(&store, InvalidationPolicy::TransactionCount);

    let first = cache.get_or_build(false).await.unwrap();
    store.push(tx("t2", dec!(-5)));
    let second = cache.get_or_build(false).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.transaction_count(), 1);
    assert_eq!(second.transaction_count(), 2);
}

#[tokio::test]
async fn test_count_policy_misses_in_place_edit_until_forced() {
    let store = MockLedgerStore::with_ledger();
    let cache = cache_for(&store, InvalidationPolicy::TransactionCount);

    cache.get_or_build(false).await.unwrap();
    store.edit_first(tx("t1", dec!(-99)));

    let stale = cache.get_or_build(false).await.unwrap();
    assert_eq!(
        stale.transactions_on(day(2))[0].from_amount,
        Some(Amount::Fiat(dec!(-10)))
    );

    let fresh = cache.get_or_build(true).await.unwrap();
    assert_eq!(
        fresh.transactions_on(day(2))[0].from_amount,
        Some(Amount::Fiat(dec!(-99)))
    );
    assert_eq!(store.loads(), 2);
}

#[tokio::test]
async fn test_revision_policy_catches_in_place_edit() {
    let store = MockLedgerStore::with_ledger();
    store.set_revision(Some(1));
    let cache = cache_for(&store, InvalidationPolicy::Revision);

    let first = cache.get_or_build(false).await.unwrap();
    store.edit_first(tx("t1", dec!(-99)));
    store.set_revision(Some(2));
    let second = cache.get_or_build(false).await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(store.loads(), 2);
}

#[tokio::test]
async fn test_revision_policy_without_revision_uses_count() {
    let store = MockLedgerStore::with_ledger();
    let cache = cache_for(&store, InvalidationPolicy::Revision);

    cache.get_or_build(false).await.unwrap();
    cache.get_or_build(false).await.unwrap();
    assert_eq!(store.loads(), 1);

    store.push(tx("t2", dec!(-5)));
    cache.get_or_build(false).await.unwrap();
    assert_eq!(store.loads(), 2);
}

#[tokio::test]
async fn test_invalidate_drops_snapshot() {
    let store = MockLedgerStore::with_ledger();
    let cache = cache_for(&store, InvalidationPolicy::TransactionCount);

    cache.get_or_build(false).await.unwrap();
    assert!(cache.is_cached().unwrap());

    cache.invalidate().unwrap();
    assert!(!cache.is_cached().unwrap());

    cache.get_or_build(false).await.unwrap();
    assert_eq!(store.loads(), 2);
}

#[tokio::test]
async fn test_load_failure_keeps_previous_snapshot() {
    let store = MockLedgerStore::with_ledger();
    let cache = cache_for(&store, InvalidationPolicy::TransactionCount);

    let first = cache.get_or_build(false).await.unwrap();
    *store.fail_prices.lock().unwrap() = true;

    let err = cache.get_or_build(true).await.unwrap_err();
    assert!(matches!(err, Error::Repository(_)));
    assert!(cache.is_cached().unwrap());

    *store.fail_prices.lock().unwrap() = false;
    let again = cache.get_or_build(false).await.unwrap();
    assert!(Arc::ptr_eq(&first, &again));
}

#[tokio::test]
async fn test_snapshot_outlives_refresh() {
    let store = MockLedgerStore::with_ledger();
    let cache = Arc::new(cache_for(&store, InvalidationPolicy::TransactionCount));

    let held = cache.get_or_build(false).await.unwrap();
    store.push(tx("t2", dec!(-5)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                cache
                    .get_or_build(false)
                    .await
                    .map(|index| index.transaction_count())
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), 2);
    }

    assert_eq!(held.transaction_count(), 1);
}
