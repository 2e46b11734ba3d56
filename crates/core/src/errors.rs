//! Core error types for the hodlbook valuation engine.
//!
//! Every report operation returns `Result<T>`. All variants are fatal to the
//! request that produced them; nothing here is retried internally.

use thiserror::Error;

use crate::fx::FxError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Fx error: {0}")]
    Fx(#[from] FxError),

    #[error("The ledger has no transactions to establish a replay start date")]
    EmptyLedger,

    #[error("Cannot aggregate {found} into a {expected} total")]
    MixedCurrencyAggregation { expected: String, found: String },

    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

impl Error {
    /// True when the failure comes from a missing fiat or bitcoin price.
    pub fn is_rate_not_found(&self) -> bool {
        matches!(self, Error::Fx(FxError::RateNotFound { .. }))
    }

    pub(crate) fn overflow(what: impl std::fmt::Display) -> Self {
        Error::Overflow(what.to_string())
    }

    pub(crate) fn mixed(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::MixedCurrencyAggregation {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Error::Cache(err.to_string())
    }
}
