//! Market Condition Analyzer
//!
//! Reduces a quote snapshot to one market-wide trend/volatility/sentiment read.

use tracing::debug;

use crate::error::{AnalyticsError, Result};
use crate::model::{AssetRecord, MarketCondition, Trend, VolatilityLevel};

/// Average move (percentage points) beyond which the market is trending
const TREND_THRESHOLD: f64 = 1.0;

const HIGH_DISPERSION: f64 = 2.0;
const LOW_DISPERSION: f64 = 1.0;

/// Derive the market condition from the current asset list
pub fn analyze_market_conditions(assets: &[AssetRecord]) -> Result<MarketCondition> {
    if assets.is_empty() {
        return Err(AnalyticsError::EmptyInput(
            "market condition needs at least one asset".into(),
        ));
    }
    for asset in assets {
        asset.validate()?;
    }

    let n = assets.len() as f64;
    let avg_change = assets.iter().map(|a| a.change_percent).sum::<f64>() / n;
    let dispersion = (assets
        .iter()
        .map(|a| (a.change_percent - avg_change).powi(2))
        .sum::<f64>()
        / n)
        .sqrt();

    let trend = if avg_change > TREND_THRESHOLD {
        Trend::Bullish
    } else if avg_change < -TREND_THRESHOLD {
        Trend::Bearish
    } else {
        Trend::Neutral
    };

    let volatility = if dispersion > HIGH_DISPERSION {
        VolatilityLevel::High
    } else if dispersion < LOW_DISPERSION {
        VolatilityLevel::Low
    } else {
        VolatilityLevel::Medium
    };

    let sentiment = (avg_change / 2.0).tanh();

    debug!(assets = assets.len(), avg_change, dispersion, ?trend, ?volatility, "analyzed market");

    Ok(MarketCondition { trend, volatility, sentiment })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assets_with_changes(changes: &[f64]) -> Vec<AssetRecord> {
        changes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                AssetRecord::new(format!("S{i}"), "Stock", "Technology", 100.0).with_change_percent(c)
            })
            .collect()
    }

    #[test]
    fn test_uniform_rally_is_bullish_and_calm() {
        let condition = analyze_market_conditions(&assets_with_changes(&[5.0, 5.0, 5.0])).unwrap();
        assert_eq!(condition.trend, Trend::Bullish);
        assert_eq!(condition.volatility, VolatilityLevel::Low);
        assert!(condition.sentiment > 0.0);
        assert!((condition.sentiment - 2.5f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn test_selloff_is_bearish() {
        let condition = analyze_market_conditions(&assets_with_changes(&[-3.0, -1.0])).unwrap();
        assert_eq!(condition.trend, Trend::Bearish);
        // Dispersion is exactly 1.0, which is neither low nor high
        assert_eq!(condition.volatility, VolatilityLevel::Medium);
        assert!(condition.sentiment < 0.0);
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let flat = analyze_market_conditions(&assets_with_changes(&[1.0])).unwrap();
        assert_eq!(flat.trend, Trend::Neutral);

        let wide = analyze_market_conditions(&assets_with_changes(&[-4.0, 4.0])).unwrap();
        assert_eq!(wide.trend, Trend::Neutral);
        assert_eq!(wide.volatility, VolatilityLevel::High);
        assert_eq!(wide.sentiment, 0.0);
    }

    #[test]
    fn test_sentiment_saturates() {
        let condition = analyze_market_conditions(&assets_with_changes(&[80.0])).unwrap();
        assert!(condition.sentiment <= 1.0);
        assert!(condition.sentiment > 0.999);
    }

    #[test]
    fn test_empty_input() {
        let err = analyze_market_conditions(&[]).unwrap_err();
        assert_eq!(err.code(), "EMPTY_INPUT");
    }
}
