//! Chainlink Data Feeds
//!
//! Reads `latestRoundData()` from the Chainlink aggregator contracts on
//! Avalanche via raw `eth_call`, decoding the ABI return words directly.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{Result, SourceError};
use crate::model::Quote;
use crate::rpc::{RpcClient, abi_word_u128};
use crate::source::MarketDataSource;

/// `latestRoundData()` function selector
const LATEST_ROUND_DATA: &str = "0xfeaf968c";

/// `decimals()` function selector
const DECIMALS: &str = "0x313ce567";

/// Avalanche mainnet aggregator address for a pair, if supported
fn feed_address(pair: &str) -> Option<&'static str> {
    match pair {
        "AVAX/USD" => Some("0x0A77230d17318075983913bC2145DB16C7366156"),
        "ETH/USD" => Some("0x976B3D034E162d8bD72D6b9C989d545b839003b0"),
        "BTC/USD" => Some("0x2779D32d5166BAaa2B2b658333bA7e6Ec0C65743"),
        "USDC/USD" => Some("0xF096872672F44d6EBA71458D74fe67F9a77a23B9"),
        "LINK/USD" => Some("0x49ccd9ca821EfEab2b98c60dC60F518E765EDe9a"),
        _ => None,
    }
}

/// Market data source backed by Chainlink aggregators
pub struct ChainlinkFeed {
    rpc: RpcClient,
}

impl ChainlinkFeed {
    pub fn new(rpc: RpcClient) -> Self {
        Self { rpc }
    }

    /// Feed against the Avalanche mainnet public RPC
    pub fn avalanche_mainnet() -> Self {
        Self::new(RpcClient::avalanche_mainnet())
    }

    /// Decode the `latestRoundData` return into (answer, updated_at)
    ///
    /// Layout: roundId, answer, startedAt, updatedAt, answeredInRound as
    /// five 32-byte words. Answers for USD feeds are positive int256.
    fn decode_round_data(data: &[u8]) -> Result<(u128, u64)> {
        let answer = abi_word_u128(data, 1)?;
        let updated_at = abi_word_u128(data, 3)?;
        let updated_at = u64::try_from(updated_at)
            .map_err(|_| SourceError::Decode("updatedAt exceeds u64".into()))?;
        Ok((answer, updated_at))
    }

    /// Scale a raw aggregator answer by its decimals into a price
    ///
    /// `decimals` comes from an external contract call and must stay within
    /// `Decimal`'s supported scale, or construction would panic.
    fn scale_answer(answer: u128, decimals: u32) -> Result<Decimal> {
        if decimals > 28 {
            return Err(SourceError::Decode(format!(
                "unsupported feed decimals: {}",
                decimals
            )));
        }
        let answer = i128::try_from(answer)
            .map_err(|_| SourceError::Decode("answer exceeds i128".into()))?;
        Ok(Decimal::from_i128_with_scale(answer, decimals).normalize())
    }
}

#[async_trait]
impl MarketDataSource for ChainlinkFeed {
    async fn quote(&self, pair: &str) -> Result<Quote> {
        let address =
            feed_address(pair).ok_or_else(|| SourceError::UnsupportedPair(pair.to_string()))?;

        let round = self.rpc.eth_call(address, LATEST_ROUND_DATA).await?;
        let (answer, updated_at) = Self::decode_round_data(&round)?;

        let decimals_data = self.rpc.eth_call(address, DECIMALS).await?;
        let decimals = u32::try_from(abi_word_u128(&decimals_data, 0)?)
            .map_err(|_| SourceError::Decode("decimals exceeds u32".into()))?;

        let price = Self::scale_answer(answer, decimals)?;
        let as_of = DateTime::<Utc>::from_timestamp(updated_at as i64, 0)
            .unwrap_or_else(Utc::now);

        tracing::debug!(pair, %price, "chainlink feed answered");

        Ok(Quote {
            pair: pair.to_string(),
            price,
            as_of,
            verified: true,
        })
    }

    fn name(&self) -> &str {
        "Chainlink Data Feeds"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_feed_addresses() {
        assert!(feed_address("AVAX/USD").is_some());
        assert!(feed_address("LINK/USD").is_some());
        assert!(feed_address("DOGE/USD").is_none());
    }

    #[test]
    fn test_decode_round_data() {
        // roundId=7, answer=3_550_000_000, startedAt=0, updatedAt=1_700_000_000
        let mut data = vec![0u8; 160];
        data[31] = 7;
        data[48..64].copy_from_slice(&3_550_000_000u128.to_be_bytes());
        data[112..128].copy_from_slice(&1_700_000_000u128.to_be_bytes());

        let (answer, updated_at) = ChainlinkFeed::decode_round_data(&data).unwrap();
        assert_eq!(answer, 3_550_000_000);
        assert_eq!(updated_at, 1_700_000_000);
    }

    #[test]
    fn test_scale_answer() {
        let price = ChainlinkFeed::scale_answer(3_550_000_000, 8).unwrap();
        assert_eq!(price, dec!(35.5));
    }

    #[test]
    fn test_out_of_range_decimals_is_decode_error() {
        assert!(ChainlinkFeed::scale_answer(3_550_000_000, 29).is_err());
        assert!(ChainlinkFeed::scale_answer(3_550_000_000, 77).is_err());
        assert!(ChainlinkFeed::scale_answer(1, 28).is_ok());
    }

    #[test]
    fn test_truncated_return_data_is_decode_error() {
        let data = vec![0u8; 64];
        assert!(ChainlinkFeed::decode_round_data(&data).is_err());
    }
}
