//! Hodlbook Core - historical balance reconstruction and valuation.
//!
//! Rebuilds per-account balances of a bitcoin and fiat ledger for any past
//! date and values them in a target currency with no look-ahead on prices.
//! Storage is reached through the repository traits; this crate only reads.

pub mod accounts;
pub mod analytics;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod fx;
pub mod ledger;
pub mod settings;
pub mod transactions;
pub mod utils;
pub mod valuation;

pub use accounts::{Account, AccountKind, Balance};
pub use transactions::{Amount, Transaction};
pub use valuation::{ValuationService, ValuationServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
