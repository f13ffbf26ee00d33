//! Network Status Adapter
//!
//! Reads chain height and gas price from the Avalanche JSON-RPC endpoint.
//! Validator and staking figures are not exposed over this RPC surface, so
//! those come from the documented snapshot constants.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;

use crate::error::Result;
use crate::fallback;
use crate::model::{Congestion, NetworkStatus, StakingSnapshot};
use crate::rpc::{RpcClient, parse_hex_quantity, parse_hex_quantity_u128};
use crate::source::NetworkStatusSource;

/// Gas price above which congestion is reported as moderate, gwei
const MODERATE_GAS_GWEI: Decimal = rust_decimal_macros::dec!(50);

/// Gas price above which congestion is reported as high, gwei
const HIGH_GAS_GWEI: Decimal = rust_decimal_macros::dec!(150);

/// Network status source backed by the Avalanche C-Chain RPC
pub struct AvalancheRpc {
    rpc: RpcClient,
}

impl AvalancheRpc {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    /// Against the Avalanche mainnet public RPC
    pub fn avalanche_mainnet() -> Self {
        Self::new(RpcClient::avalanche_mainnet())
    }

    fn congestion_for(gas_price_gwei: Decimal) -> Congestion {
        if gas_price_gwei >= HIGH_GAS_GWEI {
            Congestion::High
        } else if gas_price_gwei >= MODERATE_GAS_GWEI {
            Congestion::Moderate
        } else {
            Congestion::Low
        }
    }

    fn wei_to_gwei(wei: u128) -> Result<Decimal> {
        let wei = i128::try_from(wei).map_err(|_| {
            crate::error::SourceError::Decode("gas price exceeds i128".into())
        })?;
        Ok(Decimal::from_i128_with_scale(wei, 9).normalize())
    }
}

#[async_trait]
impl NetworkStatusSource for AvalancheRpc {
    async fn status(&self) -> Result<NetworkStatus> {
        let height_hex = self.rpc.call_hex("eth_blockNumber", json!([])).await?;
        let block_height = parse_hex_quantity(&height_hex)?;

        let gas_hex = self.rpc.call_hex("eth_gasPrice", json!([])).await?;
        let gas_price_gwei = Self::wei_to_gwei(parse_hex_quantity_u128(&gas_hex)?)?;

        let baseline = fallback::network_status();

        tracing::debug!(block_height, %gas_price_gwei, "network status fetched");

        Ok(NetworkStatus {
            block_height,
            avg_block_time_secs: baseline.avg_block_time_secs,
            congestion: Self::congestion_for(gas_price_gwei),
            validator_count: baseline.validator_count,
            gas_price_gwei,
            gas: baseline.gas,
        })
    }

    async fn staking(&self) -> Result<StakingSnapshot> {
        // Staking figures are published on the P-Chain, not this RPC; the
        // snapshot constants are the source of record here.
        Ok(fallback::staking())
    }

    fn name(&self) -> &str {
        "Avalanche Network RPC"
    }
}
