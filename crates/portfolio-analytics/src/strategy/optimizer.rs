//! Beta-Tilted Portfolio Optimizer
//!
//! Starts from equal weights and tilts each asset along its beta, more or
//! less steeply depending on the investor's risk tolerance:
//!
//! ```text
//! adjusted_i = (1 / N) × (1 + (beta_i − 1) × multiplier)
//! weight_i   = adjusted_i / Σ adjusted
//! ```
//!
//! The tilt is linear and unclamped. A low-beta asset under a steep
//! multiplier can end up with a negative allocation; that is reported
//! through `tracing` but left in place.

use std::collections::BTreeMap;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AnalyticsError, Result};
use crate::model::{AssetRecord, InvestorProfile, RiskTolerance, StockAllocation};

/// Display currency for recommendations
pub const DISPLAY_CURRENCY: &str = "EUR";

const MONTHLY_DIVIDEND: &str = "monthly dividend estimate";

/// Portfolio-level proxies derived from weighted beta.
///
/// Not comparable with the series statistics in
/// [`RiskMetricsResult`](crate::analysis::RiskMetricsResult): these are
/// linear functions of beta, not measurements of a price history.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRiskMetrics {
    /// Weighted-average beta
    pub volatility: f64,

    /// Expected return (fraction) over weighted beta; `None` when beta sums to zero
    pub sharpe_ratio: Option<f64>,

    /// Half the weighted beta, negated
    pub max_drawdown: f64,
}

/// A complete allocation suggestion
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecommendation {
    /// One entry per input asset, input order preserved
    pub stocks: Vec<StockAllocation>,

    /// Price appreciation plus yield, in percent
    pub expected_return: f64,

    pub risk_level: RiskTolerance,

    /// Sector → summed percentage
    pub sector_distribution: BTreeMap<String, f64>,

    pub total_investment: Decimal,

    pub currency: String,

    pub monthly_dividend_estimate: Decimal,

    pub risk_metrics: PortfolioRiskMetrics,
}

/// Allocates across an asset list for one investor profile
#[derive(Clone, Debug)]
pub struct PortfolioOptimizer {
    profile: InvestorProfile,
}

impl PortfolioOptimizer {
    pub const fn new(profile: InvestorProfile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> &InvestorProfile {
        &self.profile
    }

    /// Compute the recommendation for `assets`
    pub fn optimize(&self, assets: &[AssetRecord]) -> Result<PortfolioRecommendation> {
        if assets.is_empty() {
            return Err(AnalyticsError::EmptyInput(
                "portfolio optimization needs at least one asset".into(),
            ));
        }
        for asset in assets {
            asset.validate()?;
        }

        let weights = self.calculate_weights(assets)?;

        let expected_return: f64 = assets
            .iter()
            .zip(&weights)
            .map(|(a, w)| w * (a.change_percent / 100.0 + a.dividend / 100.0))
            .sum();
        let total_risk: f64 = assets.iter().zip(&weights).map(|(a, w)| w * a.beta).sum();

        let sharpe_ratio = if total_risk == 0.0 {
            None
        } else {
            Some(expected_return / total_risk).filter(|s| s.is_finite())
        };

        let mut sector_distribution = BTreeMap::new();
        for (asset, weight) in assets.iter().zip(&weights) {
            *sector_distribution.entry(asset.sector.clone()).or_insert(0.0) += weight * 100.0;
        }

        let stocks = assets
            .iter()
            .zip(&weights)
            .map(|(asset, weight)| StockAllocation {
                symbol: asset.symbol.clone(),
                name: asset.name.clone(),
                percentage: weight * 100.0,
                sector: asset.sector.clone(),
            })
            .collect();

        let monthly_dividend_estimate = self.monthly_dividend(assets, &weights)?;

        debug!(
            assets = assets.len(),
            risk_level = %self.profile.risk_tolerance,
            expected_return,
            total_risk,
            "optimized portfolio"
        );

        Ok(PortfolioRecommendation {
            stocks,
            expected_return: expected_return * 100.0,
            risk_level: self.profile.risk_tolerance,
            sector_distribution,
            total_investment: self.profile.initial_investment,
            currency: DISPLAY_CURRENCY.to_string(),
            monthly_dividend_estimate,
            risk_metrics: PortfolioRiskMetrics {
                volatility: total_risk,
                sharpe_ratio,
                max_drawdown: total_risk * -0.5,
            },
        })
    }

    /// Normalized weights summing to 1
    fn calculate_weights(&self, assets: &[AssetRecord]) -> Result<Vec<f64>> {
        let base = 1.0 / assets.len() as f64;
        let multiplier = self.profile.risk_tolerance.risk_multiplier();

        let adjusted: Vec<f64> = assets
            .iter()
            .map(|a| base * (1.0 + (a.beta - 1.0) * multiplier))
            .collect();

        let total: f64 = adjusted.iter().sum();
        if total == 0.0 {
            return Err(AnalyticsError::DegenerateWeights { sum: total });
        }

        let weights: Vec<f64> = adjusted.iter().map(|w| w / total).collect();

        for (asset, weight) in assets.iter().zip(&weights) {
            if *weight < 0.0 {
                warn!(
                    symbol = %asset.symbol,
                    beta = asset.beta,
                    weight,
                    "beta tilt produced a negative allocation"
                );
            }
        }

        Ok(weights)
    }

    /// Σ (investment × weight) × (yield / 100) / 12
    fn monthly_dividend(&self, assets: &[AssetRecord], weights: &[f64]) -> Result<Decimal> {
        let monthly_fraction: f64 = assets
            .iter()
            .zip(weights)
            .map(|(a, w)| w * (a.dividend / 100.0) / 12.0)
            .sum();

        let fraction = Decimal::from_f64(monthly_fraction)
            .ok_or(AnalyticsError::Overflow(MONTHLY_DIVIDEND))?;

        self.profile
            .initial_investment
            .checked_mul(fraction)
            .ok_or(AnalyticsError::Overflow(MONTHLY_DIVIDEND))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn profile(risk_tolerance: RiskTolerance) -> InvestorProfile {
        InvestorProfile { risk_tolerance, initial_investment: dec!(12000), ..InvestorProfile::default() }
    }

    fn sample_assets() -> Vec<AssetRecord> {
        vec![
            AssetRecord::new("AAPL", "Apple Inc.", "Technology", 173.5)
                .with_beta(1.2)
                .with_change_percent(1.45)
                .with_dividend(0.65),
            AssetRecord::new("MSFT", "Microsoft", "Technology", 338.45)
                .with_beta(0.9)
                .with_change_percent(0.95)
                .with_dividend(0.88),
            AssetRecord::new("JNJ", "Johnson & Johnson", "Healthcare", 155.0)
                .with_beta(0.55)
                .with_change_percent(-0.4)
                .with_dividend(3.1),
            AssetRecord::new("JPM", "JPMorgan Chase", "Financial Services", 190.0)
                .with_beta(1.1)
                .with_change_percent(0.3)
                .with_dividend(2.3),
        ]
    }

    fn percentage_sum(rec: &PortfolioRecommendation) -> f64 {
        rec.stocks.iter().map(|s| s.percentage).sum()
    }

    #[test]
    fn test_single_asset_gets_everything() {
        for beta in [0.3, 1.0, 2.5] {
            let assets = vec![AssetRecord::new("TSLA", "Tesla", "Automotive", 250.0).with_beta(beta)];
            let rec = PortfolioOptimizer::new(profile(RiskTolerance::Aggressive)).optimize(&assets).unwrap();
            assert!((rec.stocks[0].percentage - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_weights_and_sectors_sum_to_100() {
        for tolerance in [RiskTolerance::Conservative, RiskTolerance::Moderate, RiskTolerance::Aggressive] {
            let rec = PortfolioOptimizer::new(profile(tolerance)).optimize(&sample_assets()).unwrap();

            assert!((percentage_sum(&rec) - 100.0).abs() < 1e-6);
            let sector_sum: f64 = rec.sector_distribution.values().sum();
            assert!((sector_sum - 100.0).abs() < 1e-6);
            assert_eq!(rec.sector_distribution.len(), 3);
            assert_eq!(rec.risk_level, tolerance);
        }
    }

    #[test]
    fn test_beta_tilt_direction() {
        let assets = vec![
            AssetRecord::new("LOW", "Low Beta", "Utilities", 50.0).with_beta(0.8),
            AssetRecord::new("HIGH", "High Beta", "Technology", 50.0).with_beta(1.2),
        ];
        let rec = PortfolioOptimizer::new(profile(RiskTolerance::Moderate)).optimize(&assets).unwrap();

        // Adjusted 0.4 and 0.6 over a total of 1.0
        assert!((rec.stocks[0].percentage - 40.0).abs() < 1e-9);
        assert!((rec.stocks[1].percentage - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_statistics() {
        let assets = vec![
            AssetRecord::new("A", "Alpha", "Energy", 10.0).with_beta(1.0).with_change_percent(2.0).with_dividend(4.0),
            AssetRecord::new("B", "Beta", "Energy", 10.0).with_beta(1.0).with_change_percent(0.0).with_dividend(2.0),
        ];
        let rec = PortfolioOptimizer::new(profile(RiskTolerance::Conservative)).optimize(&assets).unwrap();

        // Equal weights: (0.06 + 0.02) / 2 = 0.04
        assert!((rec.expected_return - 4.0).abs() < 1e-9);
        assert!((rec.risk_metrics.volatility - 1.0).abs() < 1e-12);
        assert!((rec.risk_metrics.sharpe_ratio.unwrap() - 0.04).abs() < 1e-12);
        assert!((rec.risk_metrics.max_drawdown + 0.5).abs() < 1e-12);
        assert_eq!(rec.total_investment, dec!(12000));
        assert_eq!(rec.currency, "EUR");

        // 12000 × (0.5 × 0.04 + 0.5 × 0.02) / 12 = 30
        let monthly = rec.monthly_dividend_estimate.round_dp(6);
        assert_eq!(monthly, dec!(30));
    }

    #[test]
    fn test_negative_allocation_is_preserved() {
        let assets = vec![
            AssetRecord::new("BOND", "Bond Proxy", "Fixed Income", 100.0).with_beta(0.1),
            AssetRecord::new("GROW", "Growth", "Technology", 100.0).with_beta(2.0),
        ];
        let rec = PortfolioOptimizer::new(profile(RiskTolerance::Aggressive)).optimize(&assets).unwrap();

        // 0.5 × (1 − 0.9 × 1.3) is negative and survives normalization
        assert!(rec.stocks[0].percentage < 0.0);
        assert!((percentage_sum(&rec) - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_beta_sum_has_undefined_sharpe() {
        let assets = vec![
            AssetRecord::new("X", "Hedge", "Other", 10.0).with_beta(0.0),
            AssetRecord::new("Y", "Hedge", "Other", 10.0).with_beta(0.0),
        ];
        // Conservative keeps 1 − 0.7 of the base weight, so the weights stay valid
        let rec = PortfolioOptimizer::new(profile(RiskTolerance::Conservative)).optimize(&assets).unwrap();
        assert_eq!(rec.risk_metrics.volatility, 0.0);
        assert_eq!(rec.risk_metrics.sharpe_ratio, None);
    }

    #[test]
    fn test_degenerate_weights() {
        // Moderate: 1 + (0 − 1) × 1.0 = 0 for every asset
        let assets = vec![AssetRecord::new("Z", "Zero", "Other", 10.0).with_beta(0.0)];
        let err = PortfolioOptimizer::new(profile(RiskTolerance::Moderate)).optimize(&assets).unwrap_err();
        assert_eq!(err, AnalyticsError::DegenerateWeights { sum: 0.0 });
    }

    #[test]
    fn test_dividend_too_large_for_decimal() {
        let assets = vec![AssetRecord::new("HUGE", "Huge Yield", "Other", 10.0).with_dividend(1e300)];
        let err = PortfolioOptimizer::new(profile(RiskTolerance::Moderate)).optimize(&assets).unwrap_err();
        assert_eq!(err, AnalyticsError::Overflow("monthly dividend estimate"));
        assert_eq!(err.code(), "OVERFLOW");
    }

    #[test]
    fn test_dividend_amount_overflow_is_an_error() {
        let profile = InvestorProfile { initial_investment: Decimal::MAX, ..InvestorProfile::default() };
        let assets = vec![AssetRecord::new("DIV", "Dividend", "Utilities", 10.0).with_dividend(2400.0)];
        let err = PortfolioOptimizer::new(profile).optimize(&assets).unwrap_err();
        assert_eq!(err.code(), "OVERFLOW");
    }

    #[test]
    fn test_empty_input() {
        let err = PortfolioOptimizer::new(profile(RiskTolerance::Moderate)).optimize(&[]).unwrap_err();
        assert_eq!(err.code(), "EMPTY_INPUT");
    }

    #[test]
    fn test_idempotent() {
        let optimizer = PortfolioOptimizer::new(profile(RiskTolerance::Aggressive));
        let first = optimizer.optimize(&sample_assets()).unwrap();
        let second = optimizer.optimize(&sample_assets()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_wire_format() {
        let rec = PortfolioOptimizer::new(profile(RiskTolerance::Moderate)).optimize(&sample_assets()).unwrap();
        let value = serde_json::to_value(&rec).unwrap();

        for key in [
            "stocks",
            "expectedReturn",
            "riskLevel",
            "sectorDistribution",
            "totalInvestment",
            "currency",
            "monthlyDividendEstimate",
            "riskMetrics",
        ] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
        assert_eq!(value["riskLevel"], "moderate");
        assert!(value["riskMetrics"].get("sharpeRatio").is_some());
    }
}
