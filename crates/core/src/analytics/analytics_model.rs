//! Report models produced by the analyzers.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// All-time-high and drawdown of the total ledger value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeHigh {
    /// Day the highest total was first reached
    pub ath_date: NaiveDate,
    /// Highest daily total in the target currency
    pub ath_value: Decimal,
    /// Change of the last settled day's total against the high, in percent
    pub decline_from_ath_percent: Decimal,
    /// Day of the lowest total since the high, if below it
    pub max_drawdown_date: Option<NaiveDate>,
    pub max_drawdown_percent: Option<Decimal>,
    /// Some accounts only contributed their initial amount
    pub has_accounts_without_transactions: bool,
    pub currency: String,
}

/// Granularity of a wealth overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WealthPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl WealthPeriod {
    pub fn label(&self, period_end: NaiveDate) -> String {
        match self {
            WealthPeriod::Daily => period_end.format("%Y-%m-%d").to_string(),
            WealthPeriod::Weekly => {
                let week = period_end.iso_week();
                format!("{}-W{:02}", week.year(), week.week())
            }
            WealthPeriod::Monthly => period_end.format("%Y-%m").to_string(),
            WealthPeriod::Yearly => period_end.format("%Y").to_string(),
        }
    }
}

/// Ledger value at the end of one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WealthPoint {
    pub period_end: NaiveDate,
    pub label: String,
    /// Every account valued in the target currency
    pub fiat_total: Decimal,
    /// Unconverted sum of all bitcoin accounts
    pub btc_total_sats: i64,
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Total spent per category id, as non-negative magnitudes.
pub type ExpensesByCategory = BTreeMap<String, Decimal>;
