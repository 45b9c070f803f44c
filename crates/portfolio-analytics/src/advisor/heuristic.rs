//! Rule-Table Scorer
//!
//! Builds buy/sell logits from a handful of readable signals and softmaxes
//! them against a constant hold bias. Neutral inputs therefore favor hold.

use super::scoring::{ClassProbabilities, FeatureVector, ScoringStrategy};

/// Logit assigned to hold regardless of input
const HOLD_BIAS: f64 = 0.5;

/// Weight of the daily move relative to market sentiment
const MOMENTUM_WEIGHT: f64 = 10.0;

/// Deterministic scorer with fixed, documented coefficients
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub const fn new() -> Self {
        Self
    }

    /// Positive favors buy, negative favors sell
    fn conviction(features: &FeatureVector) -> f64 {
        let momentum = features.market_sentiment + MOMENTUM_WEIGHT * features.change;

        // Yield is rewarded; only a P/E above 30 (normalized > 1) is penalized
        let value = features.dividend - (features.pe_ratio - 1.0).max(0.0);

        // Excess beta hurts less the more risk the investor accepts
        let fit = -(features.beta - 1.0).max(0.0) * (1.0 - features.risk_tolerance);

        momentum + value + fit
    }
}

impl ScoringStrategy for HeuristicScorer {
    fn score(&self, features: &FeatureVector) -> ClassProbabilities {
        let conviction = Self::conviction(features);
        ClassProbabilities::from_logits([-conviction, HOLD_BIAS, conviction])
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
