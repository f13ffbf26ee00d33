//! Data Source Contracts
//!
//! Each adapter exposes idempotent reads returning typed records or failing
//! with a `SourceError`. The composer treats failures as recoverable and
//! substitutes the documented fallback constants, tagging the result so
//! downstream code can match on provenance instead of sniffing fields.

use async_trait::async_trait;

use crate::error::Result;
use crate::model::{NetworkStatus, ProtocolRecord, Quote, StakingSnapshot};

/// A fetched value tagged with its provenance
#[derive(Clone, Debug)]
pub enum Fetched<T> {
    /// Came from the live source
    Live(T),
    /// Substituted fallback constant after the live source failed
    Fallback(T),
}

impl<T> Fetched<T> {
    /// Borrow the inner value regardless of provenance
    pub fn value(&self) -> &T {
        match self {
            Fetched::Live(v) | Fetched::Fallback(v) => v,
        }
    }

    /// Consume into the inner value
    pub fn into_value(self) -> T {
        match self {
            Fetched::Live(v) | Fetched::Fallback(v) => v,
        }
    }

    /// Whether the value came from the live source
    pub fn is_live(&self) -> bool {
        matches!(self, Fetched::Live(_))
    }
}

/// Price quote source (Chainlink data feeds or equivalent)
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Get the latest quote for a pair symbol, e.g. "AVAX/USD"
    async fn quote(&self, pair: &str) -> Result<Quote>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Catalog of yield-bearing protocols
#[async_trait]
pub trait ProtocolCatalogSource: Send + Sync {
    /// Snapshot of the catalog
    async fn protocols(&self) -> Result<Vec<ProtocolRecord>>;

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Network health, gas, and staking figures
#[async_trait]
pub trait NetworkStatusSource: Send + Sync {
    /// Current network status and gas estimates
    async fn status(&self) -> Result<NetworkStatus>;

    /// Native staking snapshot
    async fn staking(&self) -> Result<StakingSnapshot>;

    /// Source name for logging
    fn name(&self) -> &str;
}
