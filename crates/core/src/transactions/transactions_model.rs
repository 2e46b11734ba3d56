//! Transaction domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Amount on one side of a transaction, in the unit of that side's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "camelCase")]
pub enum Amount {
    Fiat(Decimal),
    Sats(i64),
}

impl Amount {
    pub fn is_negative(&self) -> bool {
        match self {
            Amount::Fiat(value) => value.is_sign_negative() && !value.is_zero(),
            Amount::Sats(sats) => *sats < 0,
        }
    }
}

/// Credit/debit against a single account, or a transfer between two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    CreditDebit,
    Transfer,
}

/// Shape of a transaction by the units on each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransferType {
    Bitcoin,
    BitcoinToBitcoin,
    BitcoinToFiat,
    Fiat,
    FiatToBitcoin,
    FiatToFiat,
    /// Sides are missing amounts
    Unknown,
}

/// A dated ledger entry.
///
/// `from_amount` is signed (negative is an outflow from `from_account_id`).
/// `to_amount` is the non-negative inflow into `to_account_id` and is only
/// set on transfers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    pub category_id: String,
    pub from_account_id: String,
    pub to_account_id: Option<String>,
    pub from_amount: Option<Amount>,
    pub to_amount: Option<Amount>,
}

impl Transaction {
    /// Credit or debit of a fiat account.
    pub fn fiat(
        id: impl Into<String>,
        date: NaiveDate,
        account_id: impl Into<String>,
        amount: Decimal,
        category_id: impl Into<String>,
    ) -> Self {
        Self::single(id, date, account_id, Amount::Fiat(amount), category_id)
    }

    /// Credit or debit of a bitcoin account.
    pub fn sats(
        id: impl Into<String>,
        date: NaiveDate,
        account_id: impl Into<String>,
        sats: i64,
        category_id: impl Into<String>,
    ) -> Self {
        Self::single(id, date, account_id, Amount::Sats(sats), category_id)
    }

    fn single(
        id: impl Into<String>,
        date: NaiveDate,
        account_id: impl Into<String>,
        amount: Amount,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            category_id: category_id.into(),
            from_account_id: account_id.into(),
            to_account_id: None,
            from_amount: Some(amount),
            to_amount: None,
        }
    }

    /// Transfer between two accounts. `from_amount` should be negative.
    pub fn transfer(
        id: impl Into<String>,
        date: NaiveDate,
        from_account_id: impl Into<String>,
        from_amount: Amount,
        to_account_id: impl Into<String>,
        to_amount: Amount,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            category_id: category_id.into(),
            from_account_id: from_account_id.into(),
            to_account_id: Some(to_account_id.into()),
            from_amount: Some(from_amount),
            to_amount: Some(to_amount),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        match self.to_account_id {
            Some(_) => TransactionKind::Transfer,
            None => TransactionKind::CreditDebit,
        }
    }

    pub fn transfer_type(&self) -> TransferType {
        match (self.from_amount, self.to_amount, self.kind()) {
            (Some(Amount::Sats(_)), _, TransactionKind::CreditDebit) => TransferType::Bitcoin,
            (Some(Amount::Fiat(_)), _, TransactionKind::CreditDebit) => TransferType::Fiat,
            (Some(Amount::Sats(_)), Some(Amount::Sats(_)), TransactionKind::Transfer) => {
                TransferType::BitcoinToBitcoin
            }
            (Some(Amount::Sats(_)), Some(Amount::Fiat(_)), TransactionKind::Transfer) => {
                TransferType::BitcoinToFiat
            }
            (Some(Amount::Fiat(_)), Some(Amount::Sats(_)), TransactionKind::Transfer) => {
                TransferType::FiatToBitcoin
            }
            (Some(Amount::Fiat(_)), Some(Amount::Fiat(_)), TransactionKind::Transfer) => {
                TransferType::FiatToFiat
            }
            _ => TransferType::Unknown,
        }
    }

    /// Account ids this transaction changes, skipping empty ids.
    pub fn touched_account_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.from_account_id.as_str())
            .chain(self.to_account_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}
