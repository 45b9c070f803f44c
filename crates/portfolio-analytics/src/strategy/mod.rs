//! Allocation Strategies
//!
//! Weighting algorithms that turn an asset list and a profile into a portfolio.

mod optimizer;

pub use optimizer::{PortfolioOptimizer, PortfolioRecommendation, PortfolioRiskMetrics, DISPLAY_CURRENCY};
