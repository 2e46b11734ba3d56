//! Periodic wealth snapshots over the last twelve periods.

use chrono::{Datelike, Duration, NaiveDate};

use super::analytics_model::{WealthPeriod, WealthPoint};
use super::portfolio_value::total_value;
use crate::accounts::Balance;
use crate::constants::WEALTH_OVERVIEW_POINTS;
use crate::errors::{Error, Result};
use crate::fx::ValuationConverter;
use crate::ledger::{BalanceReplayEngine, LedgerIndex};
use crate::utils::time_utils::{last_day_of_month, shift_month, week_ending_saturday};

pub struct WealthOverviewAnalyzer<'a> {
    index: &'a LedgerIndex,
    converter: ValuationConverter<'a>,
}

impl<'a> WealthOverviewAnalyzer<'a> {
    pub fn new(index: &'a LedgerIndex, converter: ValuationConverter<'a>) -> Self {
        Self { index, converter }
    }

    /// Value at each of the last twelve period ends, oldest first. Periods
    /// ending before the first transaction are dropped; the running period
    /// is valued as of `today`.
    pub fn compute(
        &self,
        period: WealthPeriod,
        target_currency: &str,
        today: NaiveDate,
    ) -> Result<Vec<WealthPoint>> {
        let first = self.index.first_transaction_date().ok_or(Error::EmptyLedger)?;
        let mut cursor = BalanceReplayEngine::new(self.index).cursor();
        let mut points = Vec::with_capacity(WEALTH_OVERVIEW_POINTS);

        for period_end in period_ends(period, today)
            .into_iter()
            .filter(|end| *end >= first)
        {
            let as_of = period_end.min(today);
            cursor.advance_to(as_of)?;

            let fiat_total = total_value(
                self.index,
                &self.converter,
                cursor.balances(),
                target_currency,
                as_of,
            )?;
            let btc_total = cursor
                .balances()
                .values()
                .filter(|b| matches!(b, Balance::Sats(_)))
                .try_fold(Balance::Sats(0), |acc, b| acc.checked_add(*b))?;

            points.push(WealthPoint {
                period_end,
                label: period.label(period_end),
                fiat_total,
                btc_total_sats: btc_total.as_sats().unwrap_or_default(),
            });
        }

        Ok(points)
    }
}

/// The last twelve period ends up to the one containing `today`, ascending.
pub fn period_ends(period: WealthPeriod, today: NaiveDate) -> Vec<NaiveDate> {
    let count = WEALTH_OVERVIEW_POINTS as u32;
    let mut ends: Vec<NaiveDate> = match period {
        WealthPeriod::Daily => (0..count)
            .map(|i| today - Duration::days(i64::from(i)))
            .collect(),
        WealthPeriod::Weekly => {
            let saturday = week_ending_saturday(today);
            (0..count)
                .map(|i| saturday - Duration::weeks(i64::from(i)))
                .collect()
        }
        WealthPeriod::Monthly => (0..count)
            .filter_map(|i| {
                let (year, month) = shift_month(today, i);
                last_day_of_month(year, month)
            })
            .collect(),
        WealthPeriod::Yearly => (0..count)
            .filter_map(|i| NaiveDate::from_ymd_opt(today.year() - i as i32, 12, 31))
            .collect(),
    };
    ends.reverse();
    ends
}
