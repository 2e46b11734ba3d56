//! Spending per category over a date range.

use log::debug;
use rust_decimal::Decimal;

use super::analytics_model::{DateRange, ExpensesByCategory};
use crate::accounts::Balance;
use crate::errors::{Error, Result};
use crate::fx::ValuationConverter;
use crate::ledger::LedgerIndex;
use crate::transactions::{Amount, TransactionKind};

pub struct ExpenseByCategoryAnalyzer<'a> {
    index: &'a LedgerIndex,
    converter: ValuationConverter<'a>,
}

impl<'a> ExpenseByCategoryAnalyzer<'a> {
    pub fn new(index: &'a LedgerIndex, converter: ValuationConverter<'a>) -> Self {
        Self { index, converter }
    }

    /// Sums genuine outflows (negative amounts on credit/debit transactions)
    /// per category, valued in `target_currency` on the day they happened.
    /// Transfers and inflows are not spending.
    pub fn compute(&self, range: DateRange, target_currency: &str) -> Result<ExpensesByCategory> {
        if self.index.is_empty() {
            return Err(Error::EmptyLedger);
        }

        let mut totals = ExpensesByCategory::new();
        if range.is_empty() {
            return Ok(totals);
        }

        for (day, _) in self
            .index
            .touched_days_between(range.start.pred_opt(), range.end)
        {
            for tx in self.index.transactions_on(*day) {
                if tx.kind() == TransactionKind::Transfer {
                    continue;
                }
                let Some(amount) = tx.from_amount.filter(Amount::is_negative) else {
                    continue;
                };
                let Some(account) = self.index.account(&tx.from_account_id) else {
                    debug!("Skipping expense {} of unknown account {}", tx.id, tx.from_account_id);
                    continue;
                };

                let spent = match (amount, account.is_bitcoin()) {
                    (Amount::Fiat(value), false) => Balance::Fiat(value.abs()),
                    (Amount::Sats(sats), true) => Balance::Sats(sats.saturating_neg()),
                    (Amount::Fiat(_), true) => return Err(Error::mixed("sats", "fiat")),
                    (Amount::Sats(_), false) => {
                        return Err(Error::mixed(account.currency_code(), "sats"))
                    }
                };
                let value = self.converter.convert_balance(
                    spent,
                    account.currency_code(),
                    target_currency,
                    *day,
                )?;

                let total = totals.entry(tx.category_id.clone()).or_insert(Decimal::ZERO);
                *total = total
                    .checked_add(value)
                    .ok_or_else(|| Error::overflow(format_args!("{} + {}", total, value)))?;
            }
        }

        Ok(totals)
    }
}
