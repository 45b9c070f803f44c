//! Dashboard Pipeline
//!
//! Runs the full analysis for one refresh: market condition, per-asset
//! advice, series risk over the price column and the portfolio suggestion.
//! Any failing stage fails the whole report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::advisor::{AdvisoryRecommendation, Advisor};
use crate::analysis::{analyze_market_conditions, RiskCalculator, RiskMetricsResult, RiskWarning};
use crate::error::Result;
use crate::model::{AssetRecord, InvestorProfile, MarketCondition};
use crate::strategy::{PortfolioOptimizer, PortfolioRecommendation};

/// Everything the display layer renders after a refresh
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub market_condition: MarketCondition,
    pub risk_metrics: RiskMetricsResult,
    pub risk_warnings: Vec<RiskWarning>,
    pub recommendations: BTreeMap<String, AdvisoryRecommendation>,
    pub portfolio: PortfolioRecommendation,
}

#[derive(Clone, Debug, Default)]
pub struct Dashboard {
    advisor: Advisor,
    risk_calculator: RiskCalculator,
}

impl Dashboard {
    pub const fn new(advisor: Advisor, risk_calculator: RiskCalculator) -> Self {
        Self { advisor, risk_calculator }
    }

    pub const fn advisor(&self) -> &Advisor {
        &self.advisor
    }

    pub const fn risk_calculator(&self) -> &RiskCalculator {
        &self.risk_calculator
    }

    pub fn analyze(&self, assets: &[AssetRecord], profile: &InvestorProfile) -> Result<DashboardReport> {
        profile.validate()?;

        let market_condition = analyze_market_conditions(assets)?;
        let recommendations = self.advisor.recommend_all(assets, profile, &market_condition)?;

        let prices: Vec<f64> = assets.iter().map(|a| a.price).collect();
        let risk_metrics = self.risk_calculator.calculate(&prices)?;

        let portfolio = PortfolioOptimizer::new(profile.clone()).optimize(assets)?;

        info!(
            assets = assets.len(),
            strategy = self.advisor.strategy_name(),
            trend = ?market_condition.trend,
            "dashboard analysis complete"
        );

        Ok(DashboardReport {
            market_condition,
            risk_warnings: risk_metrics.warnings(),
            risk_metrics,
            recommendations,
            portfolio,
        })
    }
}
