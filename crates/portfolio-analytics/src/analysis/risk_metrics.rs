//! Series Risk Metrics
//!
//! Volatility, Sharpe ratio and drawdown from one chronological price series.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AnalyticsError, Result};

/// Trading days used to annualize daily statistics
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annual risk-free rate subtracted in the Sharpe ratio
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.02;

/// Risk summary for a price series
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetricsResult {
    /// Annualized population standard deviation of daily returns
    pub volatility: f64,

    /// `None` when volatility is zero and the ratio is undefined
    pub sharpe_ratio: Option<f64>,

    /// Minimum of the peak-relative declines observed over the series
    pub max_drawdown: f64,
}

/// Advisory flags raised from a metrics summary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskWarning {
    LowRiskAdjustedReturn,
    HighVolatility,
    SignificantDrawdown,
}

impl RiskWarning {
    pub const fn message(self) -> &'static str {
        match self {
            Self::LowRiskAdjustedReturn => {
                "Consider rebalancing to improve risk-adjusted return"
            }
            Self::HighVolatility => "Above-average volatility detected",
            Self::SignificantDrawdown => "Significant potential losses observed",
        }
    }
}

impl RiskMetricsResult {
    /// Flags in display order; an undefined Sharpe ratio raises nothing
    pub fn warnings(&self) -> Vec<RiskWarning> {
        let mut warnings = Vec::new();
        if self.sharpe_ratio.is_some_and(|sharpe| sharpe < 1.0) {
            warnings.push(RiskWarning::LowRiskAdjustedReturn);
        }
        if self.volatility > 0.2 {
            warnings.push(RiskWarning::HighVolatility);
        }
        if self.max_drawdown < -0.2 {
            warnings.push(RiskWarning::SignificantDrawdown);
        }
        warnings
    }
}

/// Computes [`RiskMetricsResult`] from price series
#[derive(Clone, Copy, Debug)]
pub struct RiskCalculator {
    risk_free_rate: f64,
}

impl Default for RiskCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskCalculator {
    pub const fn new() -> Self {
        Self { risk_free_rate: DEFAULT_RISK_FREE_RATE }
    }

    pub const fn with_risk_free_rate(mut self, risk_free_rate: f64) -> Self {
        self.risk_free_rate = risk_free_rate;
        self
    }

    pub const fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    /// Compute metrics for prices ordered earliest first
    pub fn calculate(&self, prices: &[f64]) -> Result<RiskMetricsResult> {
        if prices.len() < 2 {
            return Err(AnalyticsError::InsufficientData { needed: 2, got: prices.len() });
        }
        if let Some((index, &price)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(AnalyticsError::InvalidPrice { index, price });
        }

        let returns = daily_returns(prices);
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
        let volatility = variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();

        let sharpe_ratio = if volatility == 0.0 {
            None
        } else {
            Some((mean * TRADING_DAYS_PER_YEAR - self.risk_free_rate) / volatility)
                .filter(|s| s.is_finite())
        };

        let max_drawdown = max_drawdown(prices, returns.len());

        debug!(
            points = prices.len(),
            volatility,
            ?sharpe_ratio,
            max_drawdown,
            "computed series risk metrics"
        );

        Ok(RiskMetricsResult { volatility, sharpe_ratio, max_drawdown })
    }
}

/// Convenience wrapper using the default risk-free rate
pub fn calculate_risk_metrics(prices: &[f64]) -> Result<RiskMetricsResult> {
    RiskCalculator::new().calculate(prices)
}

fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| (w[1] - w[0]) / w[0]).collect()
}

/// Raw minimum of `1 - p[i] / peak(i)` over the first `points` prices.
///
/// The sign is left as computed; callers treat a zero result as "no drawdown".
fn max_drawdown(prices: &[f64], points: usize) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    prices
        .iter()
        .take(points)
        .map(|&price| {
            peak = peak.max(price);
            1.0 - price / peak
        })
        .fold(f64::INFINITY, f64::min)
}
