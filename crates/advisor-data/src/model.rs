//! Source Record Types
//!
//! Point-in-time snapshots returned by the data-source adapters. None of
//! these persist beyond a single composition call.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time price observation for an asset pair
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Quote {
    /// Pair symbol, e.g. "AVAX/USD"
    pub pair: String,

    /// Latest price in the quote currency
    pub price: Decimal,

    /// When the source last updated this price
    pub as_of: DateTime<Utc>,

    /// Whether the price came from the live oracle rather than a fallback
    pub verified: bool,
}

/// Broad protocol category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolCategory {
    Lending,
    Dex,
    Yield,
    Staking,
    Derivatives,
}

impl std::fmt::Display for ProtocolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolCategory::Lending => write!(f, "lending"),
            ProtocolCategory::Dex => write!(f, "dex"),
            ProtocolCategory::Yield => write!(f, "yield"),
            ProtocolCategory::Staking => write!(f, "staking"),
            ProtocolCategory::Derivatives => write!(f, "derivatives"),
        }
    }
}

/// A yield-bearing protocol in the catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProtocolRecord {
    /// Protocol name, e.g. "Aave V3"
    pub name: String,

    /// Category of the venue
    pub category: ProtocolCategory,

    /// Advertised annualized yield, percent
    pub apy: Decimal,

    /// Total value locked, USD
    pub tvl: Decimal,

    /// Coarse risk score, 0 (safest) to 10
    pub risk_score: u8,

    /// Whether the protocol currently accepts deposits
    pub active: bool,
}

/// Network congestion label
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Congestion {
    Low,
    Moderate,
    High,
    Unknown,
}

impl std::fmt::Display for Congestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Congestion::Low => write!(f, "low"),
            Congestion::Moderate => write!(f, "moderate"),
            Congestion::High => write!(f, "high"),
            Congestion::Unknown => write!(f, "unknown"),
        }
    }
}

/// Estimated transaction costs in AVAX per transaction kind
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GasEstimates {
    pub transfer: Decimal,
    pub swap: Decimal,
    pub stake: Decimal,
    pub unstake: Decimal,
    pub claim: Decimal,
}

/// Point-in-time network health snapshot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkStatus {
    /// Current chain height
    pub block_height: u64,

    /// Average block time in seconds
    pub avg_block_time_secs: u32,

    /// Coarse congestion label
    pub congestion: Congestion,

    /// Active validator count
    pub validator_count: u32,

    /// Current gas price in gwei
    pub gas_price_gwei: Decimal,

    /// Per-transaction-kind cost estimates
    pub gas: GasEstimates,
}

/// Native staking figures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingSnapshot {
    /// Current staking APY, percent
    pub current_apy: Decimal,

    /// Total AVAX staked network-wide
    pub total_staked_avax: Decimal,

    /// Validators securing the network
    pub validator_count: u32,

    /// Typical delegation fee (fraction, e.g. 0.02)
    pub delegation_fee: Decimal,

    /// Minimum delegation stake in AVAX
    pub min_stake_avax: Decimal,

    /// Minimum staking period in days
    pub staking_period_days: u16,
}
