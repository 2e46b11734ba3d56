//! Immutable lookup structures built once per ledger snapshot.

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::accounts::Account;
use crate::fx::{BtcRatePoint, RatePoint, RateSeries};
use crate::transactions::Transaction;

/// Read-only view of accounts, transactions and prices, indexed for replay.
///
/// Built from a consistent read of the four source collections and never
/// mutated afterwards; a new ledger generation gets a new index.
#[derive(Debug, Default)]
pub struct LedgerIndex {
    accounts: BTreeMap<String, Account>,
    transactions_by_date: BTreeMap<NaiveDate, Vec<Transaction>>,
    touched_by_date: BTreeMap<NaiveDate, BTreeSet<String>>,
    touched_accounts: HashSet<String>,
    transaction_count: usize,
    fiat_rates: HashMap<String, RateSeries>,
    btc_rates: RateSeries,
}

impl LedgerIndex {
    /// Indexes the raw collections. Rows are taken as-is: duplicate account
    /// ids and duplicate rate dates keep the last row seen.
    pub fn build(
        accounts: Vec<Account>,
        transactions: Vec<Transaction>,
        fiat_rates: Vec<RatePoint>,
        btc_rates: Vec<BtcRatePoint>,
    ) -> Self {
        let account_map: BTreeMap<String, Account> =
            accounts.into_iter().map(|a| (a.id.clone(), a)).collect();

        let transaction_count = transactions.len();
        let mut transactions_by_date: BTreeMap<NaiveDate, Vec<Transaction>> = BTreeMap::new();
        let mut touched_by_date: BTreeMap<NaiveDate, BTreeSet<String>> = BTreeMap::new();
        let mut touched_accounts = HashSet::new();

        for tx in transactions {
            let touched = touched_by_date.entry(tx.date).or_default();
            for account_id in tx.touched_account_ids() {
                touched.insert(account_id.to_string());
                touched_accounts.insert(account_id.to_string());
            }
            transactions_by_date.entry(tx.date).or_default().push(tx);
        }

        let mut grouped: HashMap<String, Vec<(NaiveDate, Decimal)>> = HashMap::new();
        for point in fiat_rates {
            grouped
                .entry(point.currency_code)
                .or_default()
                .push((point.date, point.price));
        }
        let fiat_rates: HashMap<String, RateSeries> = grouped
            .into_iter()
            .map(|(code, points)| (code, RateSeries::from_points(points)))
            .collect();

        let btc_rates = RateSeries::from_points(btc_rates.into_iter().map(|p| (p.date, p.price)));

        debug!(
            "Built ledger index: {} accounts, {} transactions over {} days, {} fiat currencies, {} btc prices",
            account_map.len(),
            transaction_count,
            transactions_by_date.len(),
            fiat_rates.len(),
            btc_rates.len()
        );

        Self {
            accounts: account_map,
            transactions_by_date,
            touched_by_date,
            touched_accounts,
            transaction_count,
            fiat_rates,
            btc_rates,
        }
    }

    pub fn account(&self, account_id: &str) -> Option<&Account> {
        self.accounts.get(account_id)
    }

    /// Accounts ordered by id.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    pub fn first_transaction_date(&self) -> Option<NaiveDate> {
        self.transactions_by_date.keys().next().copied()
    }

    pub fn last_transaction_date(&self) -> Option<NaiveDate> {
        self.transactions_by_date.keys().next_back().copied()
    }

    pub fn transactions_on(&self, date: NaiveDate) -> &[Transaction] {
        self.transactions_by_date
            .get(&date)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn touched_on(&self, date: NaiveDate) -> Option<&BTreeSet<String>> {
        self.touched_by_date.get(&date)
    }

    /// Days with at least one transaction within `(after, until]`, in order.
    pub fn touched_days_between(
        &self,
        after: Option<NaiveDate>,
        until: NaiveDate,
    ) -> impl Iterator<Item = (&NaiveDate, &BTreeSet<String>)> {
        let lower = match after {
            Some(after) => std::ops::Bound::Excluded(after),
            None => std::ops::Bound::Unbounded,
        };
        let upper = std::ops::Bound::Included(until);
        let range = if after.is_some_and(|after| after >= until) {
            None
        } else {
            Some(self.touched_by_date.range((lower, upper)))
        };
        range.into_iter().flatten()
    }

    pub fn has_transactions_for(&self, account_id: &str) -> bool {
        self.touched_accounts.contains(account_id)
    }

    /// Accounts that never appear on either side of a transaction.
    pub fn untouched_accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts
            .values()
            .filter(|a| !self.touched_accounts.contains(&a.id))
    }

    pub fn fiat_series(&self, currency_code: &str) -> Option<&RateSeries> {
        self.fiat_rates.get(currency_code)
    }

    pub fn btc_series(&self) -> &RateSeries {
        &self.btc_rates
    }
}
