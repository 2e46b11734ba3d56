//! Accounts module - domain models and repository traits.

mod accounts_model;
mod accounts_traits;

pub use accounts_model::{Account, AccountKind, Balance};
pub use accounts_traits::AccountRepositoryTrait;
