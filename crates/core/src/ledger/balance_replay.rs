//! Day-by-day reconstruction of account balances.

use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::ledger_index::LedgerIndex;
use crate::accounts::{Account, Balance};
use crate::errors::{Error, Result};
use crate::transactions::Amount;

/// Balance of every account keyed by account id.
pub type AccountBalances = BTreeMap<String, Balance>;

/// Replays the indexed ledger to compute balances as of any date.
#[derive(Debug, Clone, Copy)]
pub struct BalanceReplayEngine<'a> {
    index: &'a LedgerIndex,
}

impl<'a> BalanceReplayEngine<'a> {
    pub fn new(index: &'a LedgerIndex) -> Self {
        Self { index }
    }

    /// Balances of every account at the end of `as_of`.
    ///
    /// Seeds each account with its initial amount and applies every
    /// transaction dated on or before `as_of`. Days without transactions are
    /// skipped since they leave every balance unchanged.
    pub fn compute_balances(&self, as_of: NaiveDate) -> Result<AccountBalances> {
        let mut cursor = self.cursor();
        cursor.advance_to(as_of)?;
        Ok(cursor.into_balances())
    }

    /// A replay positioned before the first transaction, for callers that
    /// walk forward one day at a time.
    pub fn cursor(&self) -> BalanceCursor<'a> {
        BalanceCursor::new(self.index)
    }
}

/// Incremental replay state. `advance_to(d)` leaves the same balances as
/// `compute_balances(d)`.
#[derive(Debug, Clone)]
pub struct BalanceCursor<'a> {
    index: &'a LedgerIndex,
    balances: AccountBalances,
    applied_through: Option<NaiveDate>,
}

impl<'a> BalanceCursor<'a> {
    fn new(index: &'a LedgerIndex) -> Self {
        Self {
            index,
            balances: seed(index),
            applied_through: index.first_transaction_date().and_then(|d| d.pred_opt()),
        }
    }

    pub fn balances(&self) -> &AccountBalances {
        &self.balances
    }

    pub fn into_balances(self) -> AccountBalances {
        self.balances
    }

    pub fn applied_through(&self) -> Option<NaiveDate> {
        self.applied_through
    }

    /// Applies every transaction in `(applied_through, date]`. Moving
    /// backwards restarts the replay from the initial amounts.
    pub fn advance_to(&mut self, date: NaiveDate) -> Result<()> {
        if self.applied_through.is_some_and(|applied| date < applied) {
            *self = Self::new(self.index);
        }

        let index = self.index;
        for (day, touched) in index.touched_days_between(self.applied_through, date) {
            apply_day(index, &mut self.balances, *day, touched)?;
        }

        self.applied_through = Some(match self.applied_through {
            Some(applied) => applied.max(date),
            None => date,
        });
        Ok(())
    }
}

fn seed(index: &LedgerIndex) -> AccountBalances {
    index
        .accounts()
        .map(|account| (account.id.clone(), account.initial_balance()))
        .collect()
}

fn apply_day(
    index: &LedgerIndex,
    balances: &mut AccountBalances,
    day: NaiveDate,
    touched: &BTreeSet<String>,
) -> Result<()> {
    let transactions = index.transactions_on(day);

    for account_id in touched {
        let Some(balance) = balances.get_mut(account_id) else {
            debug!("Skipping transactions on {} for unknown account {}", day, account_id);
            continue;
        };

        let mut delta = balance.zero_like();
        for tx in transactions {
            if tx.from_account_id == *account_id {
                if let Some(amount) = tx.from_amount {
                    delta = delta.checked_add(as_balance(amount))?;
                }
            }
            if tx.to_account_id.as_deref() == Some(account_id.as_str()) {
                if let Some(amount) = tx.to_amount {
                    delta = delta.checked_add(as_balance(amount))?;
                }
            }
        }
        *balance = balance.checked_add(delta)?;
    }
    Ok(())
}

fn as_balance(amount: Amount) -> Balance {
    match amount {
        Amount::Fiat(value) => Balance::Fiat(value),
        Amount::Sats(sats) => Balance::Sats(sats),
    }
}

/// Sum of several accounts' balances in their own, shared currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTotal {
    pub currency: String,
    pub total: Balance,
}

/// Adds up balances of accounts that share one currency without converting.
///
/// Returns `None` for an empty selection and `MixedCurrencyAggregation` as
/// soon as a second currency shows up.
pub fn native_total<'b>(
    accounts: impl IntoIterator<Item = &'b Account>,
    balances: &AccountBalances,
) -> Result<Option<NativeTotal>> {
    let mut total: Option<NativeTotal> = None;

    for account in accounts {
        let balance = balances
            .get(&account.id)
            .copied()
            .unwrap_or_else(|| account.initial_balance());

        total = Some(match total {
            None => NativeTotal {
                currency: account.currency_code().to_string(),
                total: balance,
            },
            Some(acc) if acc.currency == account.currency_code() => NativeTotal {
                total: acc.total.checked_add(balance)?,
                currency: acc.currency,
            },
            Some(acc) => return Err(Error::mixed(acc.currency, account.currency_code())),
        });
    }

    Ok(total)
}
