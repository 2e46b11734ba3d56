use futures::try_join;
use log::{debug, info, warn};
use std::sync::{Arc, RwLock};

use crate::accounts::AccountRepositoryTrait;
use crate::errors::Result;
use crate::fx::PriceRepositoryTrait;
use crate::ledger::LedgerIndex;
use crate::settings::InvalidationPolicy;
use crate::transactions::TransactionRepositoryTrait;

/// Cheap marker of the ledger state a snapshot was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheFingerprint {
    TransactionCount(usize),
    Revision(u64),
}

struct CachedLedger {
    index: Arc<LedgerIndex>,
    fingerprint: CacheFingerprint,
}

/// Holds the most recent `LedgerIndex` and rebuilds it when the
/// repositories report a different fingerprint.
///
/// Snapshots are immutable and handed out as `Arc`s, so a report keeps the
/// snapshot it started with even if a concurrent refresh replaces it.
/// Concurrent rebuilds are allowed; the last one to finish is kept.
pub struct ProviderCache {
    accounts: Arc<dyn AccountRepositoryTrait>,
    transactions: Arc<dyn TransactionRepositoryTrait>,
    prices: Arc<dyn PriceRepositoryTrait>,
    policy: InvalidationPolicy,
    cached: RwLock<Option<CachedLedger>>,
}

impl ProviderCache {
    pub fn new(
        accounts: Arc<dyn AccountRepositoryTrait>,
        transactions: Arc<dyn TransactionRepositoryTrait>,
        prices: Arc<dyn PriceRepositoryTrait>,
        policy: InvalidationPolicy,
    ) -> Self {
        Self {
            accounts,
            transactions,
            prices,
            policy,
            cached: RwLock::new(None),
        }
    }

    /// Returns the cached snapshot while its fingerprint still matches the
    /// repositories, otherwise loads everything and installs a new one.
    pub async fn get_or_build(&self, force_refresh: bool) -> Result<Arc<LedgerIndex>> {
        let fingerprint = self.current_fingerprint().await?;

        if !force_refresh {
            let guard = self.cached.read()?;
            if let Some(cached) = guard.as_ref() {
                if cached.fingerprint == fingerprint {
                    debug!("Ledger cache hit ({:?})", fingerprint);
                    return Ok(Arc::clone(&cached.index));
                }
                debug!(
                    "Ledger cache stale: {:?} -> {:?}",
                    cached.fingerprint, fingerprint
                );
            }
        }

        let index = Arc::new(self.load().await?);
        let mut guard = self.cached.write()?;
        *guard = Some(CachedLedger {
            index: Arc::clone(&index),
            fingerprint,
        });
        info!(
            "Ledger snapshot rebuilt: {} accounts, {} transactions",
            index.account_count(),
            index.transaction_count()
        );
        Ok(index)
    }

    /// Drops the cached snapshot; the next request rebuilds.
    pub fn invalidate(&self) -> Result<()> {
        let mut guard = self.cached.write()?;
        if guard.take().is_some() {
            debug!("Ledger cache invalidated");
        }
        Ok(())
    }

    pub fn is_cached(&self) -> Result<bool> {
        Ok(self.cached.read()?.is_some())
    }

    async fn current_fingerprint(&self) -> Result<CacheFingerprint> {
        if self.policy == InvalidationPolicy::Revision {
            match self.transactions.revision().await? {
                Some(revision) => return Ok(CacheFingerprint::Revision(revision)),
                None => warn!("Transaction store keeps no revision, falling back to count"),
            }
        }
        Ok(CacheFingerprint::TransactionCount(
            self.transactions.count().await?,
        ))
    }

    async fn load(&self) -> Result<LedgerIndex> {
        let (accounts, transactions, fiat_rates, btc_rates) = try_join!(
            self.accounts.list(),
            self.transactions.list(),
            self.prices.list_fiat_rates(),
            self.prices.list_btc_rates(),
        )?;
        Ok(LedgerIndex::build(accounts, transactions, fiat_rates, btc_rates))
    }
}
