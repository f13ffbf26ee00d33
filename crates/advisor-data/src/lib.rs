//! # advisor-data
//!
//! Data-source adapters for the DeFi advisor: Chainlink price feeds and
//! Avalanche network status over JSON-RPC, the protocol catalog, and the
//! documented fallback constants used when a live source is unavailable.
//!
//! Every adapter is an idempotent read behind a trait; failures surface as
//! `SourceError` and are recovered by the composer, never propagated to the
//! user.

pub mod catalog;
pub mod chainlink;
pub mod error;
pub mod fallback;
pub mod model;
pub mod network;
pub mod rpc;
pub mod source;

pub use catalog::StaticCatalog;
pub use chainlink::ChainlinkFeed;
pub use error::{Result, SourceError};
pub use model::{
    Congestion, GasEstimates, NetworkStatus, ProtocolCategory, ProtocolRecord, Quote,
    StakingSnapshot,
};
pub use network::AvalancheRpc;
pub use source::{Fetched, MarketDataSource, NetworkStatusSource, ProtocolCatalogSource};
