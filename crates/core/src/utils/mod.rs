pub mod time_utils;

pub use time_utils::{Clock, FixedClock, SystemClock};
