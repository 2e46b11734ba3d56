use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;

/// Default timezone for valuation dates.
pub const DEFAULT_VALUATION_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to a valuation date in the given timezone.
pub fn valuation_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Source of the current local calendar date.
///
/// "Today" and "yesterday" boundaries of every report come from here so
/// callers can pin them.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in a fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    tz: Tz,
}

impl SystemClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new(DEFAULT_VALUATION_TZ)
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        valuation_date_from_utc(Utc::now(), self.tz)
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub fn get_days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// The Saturday closing the week `date` belongs to (the date itself on a Saturday).
pub fn week_ending_saturday(date: NaiveDate) -> NaiveDate {
    let days_until = (Weekday::Sat.num_days_from_sunday() + 7
        - date.weekday().num_days_from_sunday())
        % 7;
    date + Duration::days(i64::from(days_until))
}

/// Calendar month `months_back` months before the month of `date`.
pub fn shift_month(date: NaiveDate, months_back: u32) -> (i32, u32) {
    let total = date.year() * 12 + date.month0() as i32 - months_back as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}
