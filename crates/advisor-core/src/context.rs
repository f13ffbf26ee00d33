//! Wallet Context
//!
//! Per-request snapshot of the wallet collaborator's state. The core never
//! mutates it, only reads it to parameterize prompts and readiness checks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Avalanche C-Chain mainnet chain id
pub const AVALANCHE_MAINNET: u64 = 43114;

/// Avalanche Fuji testnet chain id
pub const AVALANCHE_FUJI: u64 = 43113;

/// Snapshot of the connected wallet, supplied by the caller per request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Wallet address, if connected
    #[serde(default)]
    pub address: Option<String>,

    /// Native token balance (decimal string on the wire)
    #[serde(with = "rust_decimal::serde::str")]
    pub balance: Decimal,

    /// Chain the wallet is connected to
    #[serde(default)]
    pub chain_id: Option<u64>,

    /// Whether a wallet is connected at all
    #[serde(default)]
    pub wallet_connected: bool,
}

impl ConversationContext {
    /// A disconnected wallet with no funds
    pub fn disconnected() -> Self {
        Self {
            address: None,
            balance: Decimal::ZERO,
            chain_id: None,
            wallet_connected: false,
        }
    }

    /// Human-readable network label for the connected chain
    pub fn network_label(&self) -> String {
        match self.chain_id {
            Some(AVALANCHE_MAINNET) => "Avalanche Mainnet".into(),
            Some(AVALANCHE_FUJI) => "Avalanche Fuji Testnet".into(),
            Some(other) => format!("Chain {}", other),
            None => "Unknown".into(),
        }
    }

    /// Abbreviated address for display, e.g. `0x1234...abcd`
    ///
    /// The address is caller-supplied and not guaranteed to be ASCII, so
    /// abbreviation works on characters, never byte offsets.
    pub fn short_address(&self) -> String {
        match &self.address {
            Some(addr) => {
                let chars: Vec<char> = addr.chars().collect();
                if chars.len() > 10 {
                    let head: String = chars[..6].iter().collect();
                    let tail: String = chars[chars.len() - 4..].iter().collect();
                    format!("{}...{}", head, tail)
                } else {
                    addr.clone()
                }
            }
            None => "not connected".into(),
        }
    }

    /// Balance valued in USD at the given price
    pub fn usd_value(&self, price: Decimal) -> Decimal {
        self.balance * price
    }

    /// Whether the wallet holds any funds
    pub fn has_funds(&self) -> bool {
        self.balance > Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ctx(chain_id: Option<u64>) -> ConversationContext {
        ConversationContext {
            address: Some("0x71C7656EC7ab88b098defB751B7401B5f6d8976F".into()),
            balance: dec!(2.5),
            chain_id,
            wallet_connected: true,
        }
    }

    #[test]
    fn test_network_labels() {
        assert_eq!(ctx(Some(43114)).network_label(), "Avalanche Mainnet");
        assert_eq!(ctx(Some(43113)).network_label(), "Avalanche Fuji Testnet");
        assert_eq!(ctx(Some(1)).network_label(), "Chain 1");
        assert_eq!(ctx(None).network_label(), "Unknown");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(ctx(None).short_address(), "0x71C7...976F");
        assert_eq!(
            ConversationContext::disconnected().short_address(),
            "not connected"
        );
    }

    #[test]
    fn test_short_address_multibyte() {
        let mut context = ctx(None);

        // Eleven four-byte characters; byte offsets would split mid-char
        context.address = Some("\u{1D11E}".repeat(11));
        assert_eq!(
            context.short_address(),
            format!("{}...{}", "\u{1D11E}".repeat(6), "\u{1D11E}".repeat(4))
        );

        // At or below ten characters the address is returned unchanged
        context.address = Some("\u{1D11E}".repeat(3));
        assert_eq!(context.short_address(), "\u{1D11E}".repeat(3));
    }

    #[test]
    fn test_usd_value() {
        assert_eq!(ctx(None).usd_value(dec!(35.50)), dec!(88.750));
    }

    #[test]
    fn test_balance_deserializes_from_string() {
        let json = r#"{"address":null,"balance":"1.75","chain_id":43114,"wallet_connected":true}"#;
        let parsed: ConversationContext = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.balance, dec!(1.75));
        assert!(parsed.has_funds());
    }
}
