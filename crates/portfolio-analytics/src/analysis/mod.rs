//! Market and Series Analysis
//!
//! Statistics computed directly from quote data, without investor context.

mod market_condition;
mod risk_metrics;

pub use market_condition::analyze_market_conditions;
pub use risk_metrics::{
    calculate_risk_metrics, RiskCalculator, RiskMetricsResult, RiskWarning,
    DEFAULT_RISK_FREE_RATE, TRADING_DAYS_PER_YEAR,
};
