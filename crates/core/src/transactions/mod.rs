//! Transactions module - ledger entries and their repository trait.

mod transactions_model;
mod transactions_traits;

pub use transactions_model::{Amount, Transaction, TransactionKind, TransferType};
pub use transactions_traits::TransactionRepositoryTrait;
