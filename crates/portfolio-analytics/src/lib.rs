//! # portfolio-analytics
//!
//! Risk, market and allocation analytics behind the investment dashboard.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────────┐   ┌──────────────────────┐
//! │ AssetSource  │──▶│ MarketCondition     │──▶│ Advisor (per asset)  │
//! │ (snapshot)   │   │ analyzer            │   │ strategy + rules     │
//! └──────┬───────┘   └─────────────────────┘   └──────────────────────┘
//!        │
//!        ├──────────▶ PortfolioOptimizer ──▶ PortfolioRecommendation
//!        │
//!        └─ prices ─▶ RiskCalculator ──────▶ RiskMetricsResult
//! ```
//!
//! Every stage is a pure function of its inputs: no clock, no I/O, no
//! shared mutable state. The only async piece is the [`source`] seam.

pub mod advisor;
pub mod analysis;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod source;
pub mod strategy;

pub use advisor::{
    mean_variance_weight, Action, AdvisoryRecommendation, Advisor, DenseNetwork, HeuristicScorer,
    ScoringStrategy,
};
pub use analysis::{analyze_market_conditions, calculate_risk_metrics, RiskCalculator, RiskMetricsResult};
pub use dashboard::{Dashboard, DashboardReport};
pub use error::{AnalyticsError, Result};
pub use model::{AssetRecord, InvestorProfile, MarketCondition, RiskTolerance, Trend, VolatilityLevel};
pub use source::{AssetSource, StaticAssetSource};
pub use strategy::{PortfolioOptimizer, PortfolioRecommendation};
