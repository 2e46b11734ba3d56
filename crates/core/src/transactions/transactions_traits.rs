//! Transaction repository trait.

use async_trait::async_trait;

use super::transactions_model::Transaction;
use crate::errors::Result;

/// Read-only transaction source consumed by the provider cache.
#[async_trait]
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Lists every transaction in the ledger, in any order.
    async fn list(&self) -> Result<Vec<Transaction>>;

    /// Current number of stored transactions.
    async fn count(&self) -> Result<usize>;

    /// Counter bumped on every ledger mutation, if the store keeps one.
    async fn revision(&self) -> Result<Option<u64>> {
        Ok(None)
    }
}
