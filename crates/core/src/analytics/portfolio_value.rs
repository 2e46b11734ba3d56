//! Valuation of a set of replayed balances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::errors::{Error, Result};
use crate::fx::ValuationConverter;
use crate::ledger::{AccountBalances, LedgerIndex};

/// Each account's balance converted into `target_currency` on `date`.
pub fn valued_balances(
    index: &LedgerIndex,
    converter: &ValuationConverter<'_>,
    balances: &AccountBalances,
    target_currency: &str,
    date: NaiveDate,
) -> Result<BTreeMap<String, Decimal>> {
    index
        .accounts()
        .filter_map(|account| balances.get(&account.id).map(|b| (account, *b)))
        .map(|(account, balance)| -> Result<(String, Decimal)> {
            let value =
                converter.convert_balance(balance, account.currency_code(), target_currency, date)?;
            Ok((account.id.clone(), value))
        })
        .collect()
}

/// Sum of all accounts valued in `target_currency` on `date`.
pub fn total_value(
    index: &LedgerIndex,
    converter: &ValuationConverter<'_>,
    balances: &AccountBalances,
    target_currency: &str,
    date: NaiveDate,
) -> Result<Decimal> {
    let mut total = Decimal::ZERO;
    for account in index.accounts() {
        if let Some(balance) = balances.get(&account.id) {
            let value = converter.convert_balance(
                *balance,
                account.currency_code(),
                target_currency,
                date,
            )?;
            total = total
                .checked_add(value)
                .ok_or_else(|| Error::overflow(format_args!("{} + {}", total, value)))?;
        }
    }
    Ok(total)
}
