//! JSON-RPC Plumbing
//!
//! Minimal Ethereum-style JSON-RPC client shared by the Chainlink feed and
//! network status adapters.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{Result, SourceError};

/// Avalanche C-Chain mainnet public RPC endpoint
pub const AVALANCHE_MAINNET_RPC: &str = "https://api.avax.network/ext/bc/C/rpc";

/// Avalanche Fuji testnet public RPC endpoint
pub const AVALANCHE_FUJI_RPC: &str = "https://api.avax-test.network/ext/bc/C/rpc";

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Thin JSON-RPC 2.0 client over reqwest
#[derive(Clone, Debug)]
pub struct RpcClient {
    http: reqwest::Client,
    url: String,
}

impl RpcClient {
    /// Create a client for the given endpoint with a 10 second timeout
    pub fn new(url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_default();

        Self {
            http,
            url: url.into(),
        }
    }

    /// Client for Avalanche mainnet
    pub fn avalanche_mainnet() -> Self {
        Self::new(AVALANCHE_MAINNET_RPC)
    }

    /// Issue a single RPC call and return the raw `result` value
    pub async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response: RpcResponse = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(SourceError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        response
            .result
            .ok_or_else(|| SourceError::Decode("missing result field".into()))
    }

    /// Issue a call whose result is a hex-encoded string
    pub async fn call_hex(&self, method: &str, params: Value) -> Result<String> {
        let value = self.call(method, params).await?;
        value
            .as_str()
            .map(str::to_owned)
            .ok_or_else(|| SourceError::Decode("expected hex string result".into()))
    }

    /// `eth_call` against a contract with pre-encoded calldata
    pub async fn eth_call(&self, to: &str, data: &str) -> Result<Vec<u8>> {
        let result = self
            .call_hex("eth_call", json!([{ "to": to, "data": data }, "latest"]))
            .await?;
        decode_hex_bytes(&result)
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Parse a 0x-prefixed hex quantity (e.g. `"0x1b4"`)
pub fn parse_hex_quantity(s: &str) -> Result<u64> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(trimmed, 16)
        .map_err(|e| SourceError::Decode(format!("bad hex quantity {:?}: {}", s, e)))
}

/// Parse a 0x-prefixed hex quantity that may exceed u64 (e.g. wei amounts)
pub fn parse_hex_quantity_u128(s: &str) -> Result<u128> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(trimmed, 16)
        .map_err(|e| SourceError::Decode(format!("bad hex quantity {:?}: {}", s, e)))
}

/// Decode 0x-prefixed hex call data into bytes
pub fn decode_hex_bytes(s: &str) -> Result<Vec<u8>> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(trimmed).map_err(|e| SourceError::Decode(format!("bad hex data: {}", e)))
}

/// Borrow the `idx`-th 32-byte ABI word from return data
pub fn abi_word(data: &[u8], idx: usize) -> Result<&[u8]> {
    let start = idx * 32;
    let end = start + 32;
    if data.len() < end {
        return Err(SourceError::Decode(format!(
            "return data too short: need word {}, have {} bytes",
            idx,
            data.len()
        )));
    }
    Ok(&data[start..end])
}

/// Decode an ABI word as an unsigned integer, rejecting values beyond u128
pub fn abi_word_u128(data: &[u8], idx: usize) -> Result<u128> {
    let word = abi_word(data, idx)?;
    if word[..16].iter().any(|&b| b != 0) {
        return Err(SourceError::Decode(format!("word {} exceeds u128", idx)));
    }
    let mut buf = [0u8; 16];
    buf.copy_from_slice(&word[16..]);
    Ok(u128::from_be_bytes(buf))
}
