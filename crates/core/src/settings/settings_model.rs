//! Valuation engine settings.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::constants::{DEFAULT_RATE_CUTOFF_DATE, PIVOT_CURRENCY};
use crate::errors::{Error, Result};

pub const ENV_RATE_CUTOFF_DATE: &str = "HODLBOOK_RATE_CUTOFF_DATE";
pub const ENV_CACHE_INVALIDATION: &str = "HODLBOOK_CACHE_INVALIDATION";
pub const ENV_TIMEZONE: &str = "HODLBOOK_TIMEZONE";
pub const ENV_BASE_CURRENCY: &str = "HODLBOOK_BASE_CURRENCY";

/// How the provider cache decides a cached snapshot is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InvalidationPolicy {
    /// Compare the stored transaction count. Edits that keep the count
    /// unchanged go unnoticed until a forced refresh.
    #[default]
    TransactionCount,
    /// Compare the repository's mutation counter.
    Revision,
}

impl FromStr for InvalidationPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "count" | "transaction_count" | "transactioncount" => {
                Ok(InvalidationPolicy::TransactionCount)
            }
            "revision" => Ok(InvalidationPolicy::Revision),
            other => Err(Error::InvalidConfigValue(format!(
                "{}: unknown cache invalidation policy '{}'",
                ENV_CACHE_INVALIDATION, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValuationSettings {
    /// Rate lookups before this date use the earliest stored rate.
    pub rate_cutoff_date: NaiveDate,
    pub invalidation_policy: InvalidationPolicy,
    /// IANA timezone that defines the local calendar date.
    pub timezone: String,
    /// Reporting currency used when a caller does not name one.
    pub base_currency: String,
}

impl Default for ValuationSettings {
    fn default() -> Self {
        Self {
            rate_cutoff_date: default_cutoff(),
            invalidation_policy: InvalidationPolicy::default(),
            timezone: "UTC".to_string(),
            base_currency: PIVOT_CURRENCY.to_string(),
        }
    }
}

fn default_cutoff() -> NaiveDate {
    NaiveDate::parse_from_str(DEFAULT_RATE_CUTOFF_DATE, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

impl ValuationSettings {
    /// Reads overrides from the process environment. Unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env` with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(raw) = lookup(ENV_RATE_CUTOFF_DATE) {
            settings.rate_cutoff_date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|e| {
                    Error::InvalidConfigValue(format!("{}='{}': {}", ENV_RATE_CUTOFF_DATE, raw, e))
                })?;
        }
        if let Some(raw) = lookup(ENV_CACHE_INVALIDATION) {
            settings.invalidation_policy = raw.parse()?;
        }
        if let Some(raw) = lookup(ENV_TIMEZONE) {
            settings.timezone = raw.trim().to_string();
        }
        if let Some(raw) = lookup(ENV_BASE_CURRENCY) {
            let code = raw.trim().to_ascii_uppercase();
            if code.is_empty() {
                return Err(Error::InvalidConfigValue(format!(
                    "{} must not be empty",
                    ENV_BASE_CURRENCY
                )));
            }
            settings.base_currency = code;
        }

        settings.tz()?;
        Ok(settings)
    }

    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|e| {
            Error::InvalidConfigValue(format!("timezone '{}': {}", self.timezone, e))
        })
    }
}
