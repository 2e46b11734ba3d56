use super::fx_model::{BtcRatePoint, RatePoint};
use crate::errors::Result;
use async_trait::async_trait;

/// Read-only price source. Both collections are expressed relative to the
/// pivot currency.
#[async_trait]
pub trait PriceRepositoryTrait: Send + Sync {
    async fn list_fiat_rates(&self) -> Result<Vec<RatePoint>>;
    async fn list_btc_rates(&self) -> Result<Vec<BtcRatePoint>>;
}
