//! Account domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{BTC_CURRENCY, SATS_PER_BTC};
use crate::errors::{Error, Result};

/// Unit-specific part of an account.
///
/// Fiat accounts hold decimal amounts in their own currency; bitcoin
/// accounts hold integer satoshis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AccountKind {
    #[serde(rename_all = "camelCase")]
    Fiat {
        currency_code: String,
        initial_amount: Decimal,
    },
    #[serde(rename_all = "camelCase")]
    Bitcoin { initial_sats: i64 },
}

/// Domain model representing an account in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: AccountKind,
}

impl Account {
    pub fn fiat(id: impl Into<String>, currency_code: impl Into<String>, initial_amount: Decimal) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind: AccountKind::Fiat {
                currency_code: currency_code.into(),
                initial_amount,
            },
        }
    }

    pub fn bitcoin(id: impl Into<String>, initial_sats: i64) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind: AccountKind::Bitcoin { initial_sats },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_bitcoin(&self) -> bool {
        matches!(self.kind, AccountKind::Bitcoin { .. })
    }

    /// Currency the account is denominated in; "BTC" for bitcoin accounts.
    pub fn currency_code(&self) -> &str {
        match &self.kind {
            AccountKind::Fiat { currency_code, .. } => currency_code,
            AccountKind::Bitcoin { .. } => BTC_CURRENCY,
        }
    }

    pub fn initial_balance(&self) -> Balance {
        match &self.kind {
            AccountKind::Fiat { initial_amount, .. } => Balance::Fiat(*initial_amount),
            AccountKind::Bitcoin { initial_sats } => Balance::Sats(*initial_sats),
        }
    }
}

/// Running balance of a single account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "camelCase")]
pub enum Balance {
    Fiat(Decimal),
    Sats(i64),
}

impl Balance {
    pub fn zero_like(&self) -> Balance {
        match self {
            Balance::Fiat(_) => Balance::Fiat(Decimal::ZERO),
            Balance::Sats(_) => Balance::Sats(0),
        }
    }

    pub fn unit_name(&self) -> &'static str {
        match self {
            Balance::Fiat(_) => "fiat",
            Balance::Sats(_) => "sats",
        }
    }

    /// Adds two balances of the same unit. Fiat and sats never mix, and a
    /// sum outside the unit's range is an error.
    pub fn checked_add(self, other: Balance) -> Result<Balance> {
        match (self, other) {
            (Balance::Fiat(a), Balance::Fiat(b)) => a
                .checked_add(b)
                .map(Balance::Fiat)
                .ok_or_else(|| Error::overflow(format_args!("{} + {}", a, b))),
            (Balance::Sats(a), Balance::Sats(b)) => a
                .checked_add(b)
                .map(Balance::Sats)
                .ok_or_else(|| Error::overflow(format_args!("{} + {} sats", a, b))),
            (a, b) => Err(Error::mixed(a.unit_name(), b.unit_name())),
        }
    }

    /// The balance as a decimal amount of its natural currency unit:
    /// fiat as-is, sats as whole bitcoin.
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Balance::Fiat(amount) => *amount,
            Balance::Sats(sats) => Decimal::from(*sats) / Decimal::from(SATS_PER_BTC),
        }
    }

    pub fn as_sats(&self) -> Option<i64> {
        match self {
            Balance::Sats(sats) => Some(*sats),
            Balance::Fiat(_) => None,
        }
    }
}
