//! Advisory Scoring
//!
//! Per-asset buy/sell/hold recommendations. Two independent paths are
//! combined:
//!
//! - a [`ScoringStrategy`] turns a normalized feature vector into class
//!   probabilities (action and confidence),
//! - a fixed rule table produces the textual reasoning.
//!
//! The advisor holds no mutable state, so one instance can score every asset
//! of a refresh concurrently.

mod heuristic;
mod network;
mod rationale;
mod scoring;

pub use heuristic::HeuristicScorer;
pub use network::{DenseNetwork, DEFAULT_SEED, LAYER_SIZES};
pub use scoring::{ClassProbabilities, FeatureVector, ScoringStrategy, FEATURE_COUNT};

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::model::{AssetRecord, InvestorProfile, MarketCondition};

/// Recommended trade direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

/// Recommendation for one (asset, profile, market condition) triple
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvisoryRecommendation {
    pub action: Action,

    /// Probability of the chosen action
    pub confidence: f64,

    /// Justifications in rule evaluation order
    pub reasoning: Vec<String>,
}

/// Scores assets with a pluggable strategy
#[derive(Clone)]
pub struct Advisor {
    strategy: Arc<dyn ScoringStrategy>,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(Arc::new(DenseNetwork::default()))
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor").field("strategy", &self.strategy.name()).finish()
    }
}

impl Advisor {
    pub fn new(strategy: Arc<dyn ScoringStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Recommend an action for one asset
    pub fn recommend(
        &self,
        asset: &AssetRecord,
        profile: &InvestorProfile,
        market: &MarketCondition,
    ) -> Result<AdvisoryRecommendation> {
        profile.validate()?;
        asset.validate()?;

        let features = FeatureVector::new(asset, profile, market);
        let probabilities = self.strategy.score(&features);
        let (action, confidence) = probabilities.argmax();
        let reasoning = rationale::reasoning(asset, profile, market);

        debug!(
            symbol = %asset.symbol,
            strategy = self.strategy.name(),
            ?action,
            confidence,
            reasons = reasoning.len(),
            "scored asset"
        );

        Ok(AdvisoryRecommendation { action, confidence, reasoning })
    }

    /// Recommend for every asset, keyed by symbol.
    ///
    /// A later record with a duplicate symbol replaces the earlier one.
    pub fn recommend_all(
        &self,
        assets: &[AssetRecord],
        profile: &InvestorProfile,
        market: &MarketCondition,
    ) -> Result<BTreeMap<String, AdvisoryRecommendation>> {
        assets
            .iter()
            .map(|asset| Ok((asset.symbol.clone(), self.recommend(asset, profile, market)?)))
            .collect()
    }
}

/// Single-asset mean-variance weight: expected move over risk aversion × beta.
///
/// `None` when beta is zero and the weight is undefined.
pub fn mean_variance_weight(asset: &AssetRecord, profile: &InvestorProfile) -> Option<f64> {
    let denominator = profile.risk_tolerance.risk_aversion() * asset.beta;
    if denominator == 0.0 {
        return None;
    }
    Some(asset.change_percent / denominator).filter(|w| w.is_finite())
}
