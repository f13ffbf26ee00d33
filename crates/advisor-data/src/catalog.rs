//! Protocol Catalog
//!
//! Semi-static list of yield-bearing venues on Avalanche with advertised
//! rates and coarse risk scores.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::Result;
use crate::model::{ProtocolCategory, ProtocolRecord};
use crate::source::ProtocolCatalogSource;

fn record(
    name: &str,
    category: ProtocolCategory,
    apy: Decimal,
    tvl: Decimal,
    risk_score: u8,
) -> ProtocolRecord {
    ProtocolRecord {
        name: name.to_string(),
        category,
        apy,
        tvl,
        risk_score,
        active: true,
    }
}

/// The catalog snapshot
pub fn catalog() -> Vec<ProtocolRecord> {
    use ProtocolCategory::{Dex, Lending, Staking, Yield};

    vec![
        record("Aave V3", Lending, dec!(8.2), dec!(450_000_000), 2),
        record("Trader Joe", Dex, dec!(18.5), dec!(120_000_000), 6),
        record("Benqi", Staking, dec!(9.1), dec!(780_000_000), 3),
        record("Compound V3", Lending, dec!(10.8), dec!(85_000_000), 4),
        record("Pangolin", Dex, dec!(15.2), dec!(45_000_000), 5),
        record("Vector Finance", Yield, dec!(25.3), dec!(35_000_000), 7),
        record("Yield Yak", Yield, dec!(22.1), dec!(28_000_000), 6),
        record("Platypus", Dex, dec!(16.8), dec!(65_000_000), 5),
    ]
}

/// The `n` active protocols with the highest advertised APY
pub fn top_by_apy(protocols: &[ProtocolRecord], n: usize) -> Vec<&ProtocolRecord> {
    let mut active: Vec<&ProtocolRecord> = protocols.iter().filter(|p| p.active).collect();
    active.sort_by(|a, b| b.apy.cmp(&a.apy));
    active.truncate(n);
    active
}

/// Catalog source serving the static snapshot
#[derive(Default)]
pub struct StaticCatalog;

impl StaticCatalog {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProtocolCatalogSource for StaticCatalog {
    async fn protocols(&self) -> Result<Vec<ProtocolRecord>> {
        Ok(catalog())
    }

    fn name(&self) -> &str {
        "DeFi Protocol Catalog"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_shape() {
        let protocols = catalog();
        assert_eq!(protocols.len(), 8);
        assert!(protocols.iter().all(|p| p.active));
        assert!(protocols.iter().all(|p| p.risk_score <= 10));
        assert!(protocols.iter().all(|p| p.apy > Decimal::ZERO));
    }

    #[test]
    fn test_top_by_apy_ranking() {
        let protocols = catalog();
        let top = top_by_apy(&protocols, 5);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0].name, "Vector Finance");
        assert_eq!(top[1].name, "Yield Yak");
        for pair in top.windows(2) {
            assert!(pair[0].apy >= pair[1].apy);
        }
    }

    #[test]
    fn test_top_by_apy_skips_inactive() {
        let mut protocols = catalog();
        protocols[5].active = false; // Vector Finance

        let top = top_by_apy(&protocols, 3);
        assert!(top.iter().all(|p| p.name != "Vector Finance"));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticCatalog::new();
        let protocols = source.protocols().await.unwrap();
        assert_eq!(protocols.len(), 8);
    }
}
