//! Analytics module - reports derived from replayed and valued balances.

mod all_time_high;
mod analytics_model;
mod expense_by_category;
mod portfolio_value;
mod wealth_overview;

pub use all_time_high::AllTimeHighAnalyzer;
pub use analytics_model::*;
pub use expense_by_category::ExpenseByCategoryAnalyzer;
pub use portfolio_value::{total_value, valued_balances};
pub use wealth_overview::{period_ends, WealthOverviewAnalyzer};
