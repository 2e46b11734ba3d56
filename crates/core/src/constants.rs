/// Pivot currency every cross-currency conversion hops through
pub const PIVOT_CURRENCY: &str = "USD";

/// Currency code used for bitcoin amounts expressed in whole coins
pub const BTC_CURRENCY: &str = "BTC";

/// Satoshis per bitcoin
pub const SATS_PER_BTC: i64 = 100_000_000;

/// Default earliest date for which rate lookups are meaningful (first BTC exchange price)
pub const DEFAULT_RATE_CUTOFF_DATE: &str = "2010-07-18";

/// Number of period-end points in a wealth overview
pub const WEALTH_OVERVIEW_POINTS: usize = 12;

/// Decimal places kept on the intermediate ratio of a drawdown percentage
pub const PERCENT_RATIO_PRECISION: u32 = 4;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
