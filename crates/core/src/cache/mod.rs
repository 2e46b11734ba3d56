//! Cache module - ledger snapshots shared between report requests.

mod provider_cache;

pub use provider_cache::{CacheFingerprint, ProviderCache};

#[cfg(test)]
mod provider_cache_tests;
