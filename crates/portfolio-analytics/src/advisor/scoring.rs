//! Scoring Strategy
//!
//! The class-probability half of the advisor. A strategy is a pure mapping
//! from a fixed feature vector to sell/hold/buy probabilities, so the advisor
//! never depends on a particular numeric backend.

use serde::{Deserialize, Serialize};

use crate::model::{AssetRecord, InvestorProfile, MarketCondition};

use super::Action;

/// Number of inputs every strategy receives
pub const FEATURE_COUNT: usize = 7;

/// Normalized model inputs, in the fixed order of [`FeatureVector::to_array`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub beta: f64,

    /// P/E divided by 30
    pub pe_ratio: f64,

    /// Dividend yield divided by 5
    pub dividend: f64,

    /// Percent change divided by 100
    pub change: f64,

    /// 0 conservative, 0.5 moderate, 1 aggressive
    pub risk_tolerance: f64,

    pub market_sentiment: f64,

    /// Horizon in years divided by 10
    pub time_horizon: f64,
}

impl FeatureVector {
    pub fn new(asset: &AssetRecord, profile: &InvestorProfile, condition: &MarketCondition) -> Self {
        Self {
            beta: asset.beta,
            pe_ratio: asset.pe_ratio / 30.0,
            dividend: asset.dividend / 5.0,
            change: asset.change_percent / 100.0,
            risk_tolerance: profile.risk_tolerance.risk_scalar(),
            market_sentiment: condition.sentiment,
            time_horizon: f64::from(profile.time_horizon) / 10.0,
        }
    }

    pub const fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.beta,
            self.pe_ratio,
            self.dividend,
            self.change,
            self.risk_tolerance,
            self.market_sentiment,
            self.time_horizon,
        ]
    }
}

/// Mutually exclusive class probabilities; they sum to 1
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassProbabilities {
    pub sell: f64,
    pub hold: f64,
    pub buy: f64,
}

impl ClassProbabilities {
    /// Softmax over `[sell, hold, buy]` logits
    pub fn from_logits(logits: [f64; 3]) -> Self {
        let [sell, hold, buy] = softmax(logits);
        Self { sell, hold, buy }
    }

    /// Winning class and its probability. Ties go to sell, then hold.
    pub fn argmax(&self) -> (Action, f64) {
        let max = self.sell.max(self.hold).max(self.buy);
        if max == self.sell {
            (Action::Sell, self.sell)
        } else if max == self.hold {
            (Action::Hold, self.hold)
        } else {
            (Action::Buy, self.buy)
        }
    }
}

/// Maps a feature vector to class probabilities.
///
/// Implementations must be deterministic: identical input gives
/// bit-identical output for the lifetime of the instance.
pub trait ScoringStrategy: Send + Sync {
    fn score(&self, features: &FeatureVector) -> ClassProbabilities;

    /// Strategy name for logs and health output
    fn name(&self) -> &str;
}

pub(crate) fn softmax<const N: usize>(logits: [f64; N]) -> [f64; N] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = logits.map(|l| (l - max).exp());
    let total: f64 = exps.iter().sum();
    exps.map(|e| e / total)
}
