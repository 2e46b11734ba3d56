//! Account repository trait.
//!
//! The engine only reads accounts; creation and edits belong to the
//! command layer that owns the storage.

use async_trait::async_trait;

use super::accounts_model::Account;
use crate::errors::Result;

/// Read-only account source consumed by the provider cache.
#[async_trait]
pub trait AccountRepositoryTrait: Send + Sync {
    /// Lists every account in the ledger.
    async fn list(&self) -> Result<Vec<Account>>;
}
