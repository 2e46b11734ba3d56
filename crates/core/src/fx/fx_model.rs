use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Daily fiat price relative to the pivot currency (units of `currency_code`
/// per one pivot unit).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RatePoint {
    pub date: NaiveDate,
    pub currency_code: String,
    pub price: Decimal,
}

impl RatePoint {
    pub fn new(date: NaiveDate, currency_code: impl Into<String>, price: Decimal) -> Self {
        Self {
            date,
            currency_code: currency_code.into(),
            price,
        }
    }
}

/// Daily bitcoin price in the pivot currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BtcRatePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}

impl BtcRatePoint {
    pub fn new(date: NaiveDate, price: Decimal) -> Self {
        Self { date, price }
    }
}

/// Price history of one currency: distinct dates in ascending order plus a
/// direct date lookup.
#[derive(Debug, Clone, Default)]
pub struct RateSeries {
    dates: Vec<NaiveDate>,
    prices: HashMap<NaiveDate, Decimal>,
}

impl RateSeries {
    /// Builds a series from unordered points. The last point wins on a
    /// duplicate date.
    pub fn from_points(points: impl IntoIterator<Item = (NaiveDate, Decimal)>) -> Self {
        let mut prices = HashMap::new();
        for (date, price) in points {
            prices.insert(date, price);
        }
        let mut dates: Vec<NaiveDate> = prices.keys().copied().collect();
        dates.sort_unstable();
        Self { dates, prices }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    pub fn price_on(&self, date: NaiveDate) -> Option<Decimal> {
        self.prices.get(&date).copied()
    }

    /// Latest point dated on or before `date`. O(log n).
    pub fn latest_on_or_before(&self, date: NaiveDate) -> Option<(NaiveDate, Decimal)> {
        let idx = self.dates.partition_point(|d| *d <= date);
        let found = *self.dates.get(idx.checked_sub(1)?)?;
        self.prices.get(&found).map(|price| (found, *price))
    }
}
