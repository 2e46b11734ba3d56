use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Exchange rate not found: no {currency} price on or before {date}")]
    RateNotFound { currency: String, date: NaiveDate },

    #[error("Exchange rate for {currency} on {date} is zero")]
    ZeroRate { currency: String, date: NaiveDate },

    #[error("Currency conversion error: {0}")]
    ConversionError(String),
}

impl FxError {
    pub(crate) fn not_found(currency: &str, date: NaiveDate) -> Self {
        FxError::RateNotFound {
            currency: currency.to_string(),
            date,
        }
    }
}
