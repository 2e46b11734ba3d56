use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_model::RateSeries;
use crate::constants::{BTC_CURRENCY, PIVOT_CURRENCY};
use crate::ledger::LedgerIndex;

/// Resolves daily fiat and bitcoin prices from an indexed snapshot.
///
/// Lookups are a step function over the stored points: the latest point on
/// or before the requested date, never a later one. Requests dated before
/// the cutoff are answered with the earliest point of the series.
#[derive(Debug, Clone, Copy)]
pub struct RateResolver<'a> {
    index: &'a LedgerIndex,
    cutoff: NaiveDate,
}

impl<'a> RateResolver<'a> {
    pub fn new(index: &'a LedgerIndex, cutoff: NaiveDate) -> Self {
        Self { index, cutoff }
    }

    /// Price of one pivot unit in `currency_code` on `date`.
    pub fn rate_at(&self, date: NaiveDate, currency_code: &str) -> Result<Decimal, FxError> {
        if currency_code == PIVOT_CURRENCY {
            return Ok(Decimal::ONE);
        }
        let series = self
            .index
            .fiat_series(currency_code)
            .ok_or_else(|| FxError::not_found(currency_code, date))?;
        self.resolve(series, currency_code, date)
    }

    /// Price of one bitcoin in the pivot currency on `date`.
    pub fn btc_price_at(&self, date: NaiveDate) -> Result<Decimal, FxError> {
        self.resolve(self.index.btc_series(), BTC_CURRENCY, date)
    }

    fn resolve(
        &self,
        series: &RateSeries,
        currency_code: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        let target = if date < self.cutoff {
            series.first_date().unwrap_or(date)
        } else {
            date
        };

        series
            .latest_on_or_before(target)
            .map(|(_, price)| price)
            .ok_or_else(|| FxError::not_found(currency_code, date))
    }
}
