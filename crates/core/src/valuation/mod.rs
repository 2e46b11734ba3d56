//! Valuation module - the report facade over the cached ledger.

mod valuation_service;
mod valuation_traits;

pub use valuation_service::ValuationService;
pub use valuation_traits::ValuationServiceTrait;

#[cfg(test)]
mod valuation_service_tests;
