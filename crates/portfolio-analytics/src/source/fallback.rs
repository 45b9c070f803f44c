//! Static Fallback Source
//!
//! Served when no live feed is configured or every quote request failed.

use async_trait::async_trait;

use super::AssetSource;
use crate::error::Result;
use crate::model::AssetRecord;

/// Symbols the dashboard tracks, US listings first
pub const TRACKED_SYMBOLS: &[&str] = &[
    "AAPL", "MSFT", "GOOGL", "AMZN", "NVDA", "META", "TSLA", "JPM", "V", "JNJ",
    "SAP.DE", "ASML.AS", "LVMH.PA", "NOVO-B.CO", "ROG.SW",
];

/// Sector label for a tracked symbol, "Other" when unknown
pub fn sector_for(symbol: &str) -> &'static str {
    match symbol.to_uppercase().as_str() {
        "AAPL" | "MSFT" | "GOOGL" | "NVDA" | "META" | "SAP.DE" | "ASML.AS" => "Technology",
        "AMZN" | "LVMH.PA" => "Consumer Cyclical",
        "TSLA" => "Automotive",
        "JPM" | "V" => "Financial Services",
        "JNJ" | "NOVO-B.CO" | "ROG.SW" => "Healthcare",
        _ => "Other",
    }
}

/// Source returning a fixed snapshot
#[derive(Clone, Debug)]
pub struct StaticAssetSource {
    assets: Vec<AssetRecord>,
}

impl Default for StaticAssetSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticAssetSource {
    /// Built-in fallback quotes
    pub fn new() -> Self {
        Self { assets: fallback_assets() }
    }

    /// Serve a caller-provided snapshot instead
    pub const fn with_assets(assets: Vec<AssetRecord>) -> Self {
        Self { assets }
    }
}

#[async_trait]
impl AssetSource for StaticAssetSource {
    async fn fetch_assets(&self) -> Result<Vec<AssetRecord>> {
        Ok(self.assets.clone())
    }

    fn name(&self) -> &str {
        "static-fallback"
    }
}

#[allow(clippy::too_many_arguments)]
fn quote(
    symbol: &str,
    name: &str,
    price: f64,
    change: f64,
    change_percent: f64,
    pe_ratio: f64,
    dividend: f64,
    range_52_week: (f64, f64),
    beta: f64,
) -> AssetRecord {
    AssetRecord {
        change,
        change_percent,
        pe_ratio,
        dividend,
        low_52_week: range_52_week.0,
        high_52_week: range_52_week.1,
        beta,
        ..AssetRecord::new(symbol, name, sector_for(symbol), price)
    }
}

fn fallback_assets() -> Vec<AssetRecord> {
    vec![
        AssetRecord {
            volume: 78_500_000.0,
            market_cap: 2_800_000_000_000.0,
            avg_volume: 85_000_000.0,
            ..quote("AAPL", "Apple Inc.", 173.50, 2.50, 1.45, 28.5, 0.65, (124.17, 180.50), 1.2)
        },
        AssetRecord {
            volume: 65_400_000.0,
            market_cap: 2_500_000_000_000.0,
            avg_volume: 75_000_000.0,
            ..quote("MSFT", "Microsoft Corporation", 338.45, 3.20, 0.95, 32.1, 0.88, (213.43, 349.67), 0.9)
        },
        AssetRecord {
            volume: 6_900_000.0,
            market_cap: 380_000_000_000.0,
            avg_volume: 7_400_000.0,
            ..quote("JNJ", "Johnson & Johnson", 158.20, -0.64, -0.40, 15.2, 3.05, (144.95, 175.97), 0.55)
        },
        AssetRecord {
            volume: 9_800_000.0,
            market_cap: 540_000_000_000.0,
            avg_volume: 10_100_000.0,
            ..quote("JPM", "JPMorgan Chase & Co.", 186.10, 0.56, 0.30, 11.8, 2.30, (135.19, 200.94), 1.1)
        },
        AssetRecord {
            volume: 2_100_000.0,
            market_cap: 430_000_000_000.0,
            avg_volume: 2_600_000.0,
            ..quote("NOVO-B.CO", "Novo Nordisk A/S", 712.40, 12.10, 1.73, 41.6, 1.10, (480.15, 745.00), 0.45)
        },
    ]
}
