//! FX module - price models, rate resolution and currency conversion.

mod fx_errors;
mod fx_model;
mod fx_traits;
mod rate_resolver;
mod valuation_converter;

pub use fx_errors::FxError;
pub use fx_model::{BtcRatePoint, RatePoint, RateSeries};
pub use fx_traits::PriceRepositoryTrait;
pub use rate_resolver::RateResolver;
pub use valuation_converter::ValuationConverter;
