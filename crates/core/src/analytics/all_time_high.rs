//! All-time-high and drawdown of the total ledger value.

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use super::analytics_model::AllTimeHigh;
use super::portfolio_value::total_value;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, PERCENT_RATIO_PRECISION};
use crate::errors::{Error, Result};
use crate::fx::ValuationConverter;
use crate::ledger::{BalanceReplayEngine, LedgerIndex};
use crate::utils::time_utils::get_days_between;

pub struct AllTimeHighAnalyzer<'a> {
    index: &'a LedgerIndex,
    converter: ValuationConverter<'a>,
}

impl<'a> AllTimeHighAnalyzer<'a> {
    pub fn new(index: &'a LedgerIndex, converter: ValuationConverter<'a>) -> Self {
        Self { index, converter }
    }

    /// Scans every settled day from the first transaction through the day
    /// before `today`. Today's prices are not final and are left out.
    pub fn compute(&self, target_currency: &str, today: NaiveDate) -> Result<AllTimeHigh> {
        let first = self.index.first_transaction_date().ok_or(Error::EmptyLedger)?;
        let last = today.pred_opt().ok_or(Error::EmptyLedger)?;
        if first > last {
            debug!("No settled day between {} and {}", first, today);
            return Err(Error::EmptyLedger);
        }

        let mut cursor = BalanceReplayEngine::new(self.index).cursor();
        let mut tracker = HighWaterMark::default();

        for day in get_days_between(first, last) {
            cursor.advance_to(day)?;
            let total = total_value(
                self.index,
                &self.converter,
                cursor.balances(),
                target_currency,
                day,
            )?;
            tracker.observe(day, total);
        }

        let has_accounts_without_transactions = self.index.untouched_accounts().next().is_some();
        if has_accounts_without_transactions {
            warn!("All-time-high includes accounts without any transaction");
        }

        tracker
            .into_report(target_currency, has_accounts_without_transactions)
            .ok_or(Error::EmptyLedger)
    }
}

/// Running high and the lowest value seen since it.
#[derive(Debug, Default)]
struct HighWaterMark {
    high: Option<(NaiveDate, Decimal)>,
    low_since_high: Option<(NaiveDate, Decimal)>,
    last: Option<Decimal>,
}

impl HighWaterMark {
    fn observe(&mut self, day: NaiveDate, total: Decimal) {
        self.last = Some(total);
        match self.high {
            Some((_, high)) if total <= high => {
                if self.low_since_high.map_or(true, |(_, low)| total < low) {
                    self.low_since_high = Some((day, total));
                }
            }
            _ => {
                self.high = Some((day, total));
                self.low_since_high = None;
            }
        }
    }

    fn into_report(self, currency: &str, has_untouched: bool) -> Option<AllTimeHigh> {
        let (ath_date, ath_value) = self.high?;
        let last = self.last?;
        let drawdown = self.low_since_high.filter(|(_, low)| *low < ath_value);

        Some(AllTimeHigh {
            ath_date,
            ath_value,
            decline_from_ath_percent: percent_from_high(last, ath_value),
            max_drawdown_date: drawdown.map(|(date, _)| date),
            max_drawdown_percent: drawdown.map(|(_, low)| percent_from_high(low, ath_value)),
            has_accounts_without_transactions: has_untouched,
            currency: currency.to_string(),
        })
    }
}

/// `round(round(value / high - 1, 4) * 100, 2)`; zero against a zero high.
pub(crate) fn percent_from_high(value: Decimal, high: Decimal) -> Decimal {
    if high.is_zero() {
        return Decimal::ZERO;
    }
    let ratio = (value / high - Decimal::ONE).round_dp(PERCENT_RATIO_PRECISION);
    (ratio * Decimal::ONE_HUNDRED).round_dp(DISPLAY_DECIMAL_PRECISION)
}
