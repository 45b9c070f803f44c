//! Rationale Rules
//!
//! Human-readable justifications, independent of the class probabilities.
//! Every rule that applies fires; output order is table order.

use crate::model::{AssetRecord, InvestorProfile, MarketCondition, RiskTolerance, Trend, VolatilityLevel};

struct Rule {
    applies: fn(&AssetRecord, &InvestorProfile, &MarketCondition) -> bool,
    reason: &'static str,
}

const RULES: &[Rule] = &[
    Rule {
        applies: |asset, _, _| asset.price >= 0.9 * asset.high_52_week,
        reason: "Price is trading near its 52-week high",
    },
    Rule {
        applies: |asset, _, _| asset.pe_ratio > 30.0,
        reason: "Elevated P/E ratio suggests possible overvaluation",
    },
    Rule {
        applies: |asset, _, _| asset.dividend > 3.0,
        reason: "Attractive dividend for long-term investing",
    },
    Rule {
        applies: |_, _, market| market.trend == Trend::Bullish,
        reason: "Bullish market trend is favorable",
    },
    Rule {
        applies: |_, _, market| market.volatility == VolatilityLevel::High,
        reason: "High market volatility suggests caution",
    },
    Rule {
        applies: |asset, profile, _| {
            asset.beta > 1.5 && profile.risk_tolerance == RiskTolerance::Conservative
        },
        reason: "High beta is not aligned with a conservative profile",
    },
];

pub(crate) fn reasoning(
    asset: &AssetRecord,
    profile: &InvestorProfile,
    market: &MarketCondition,
) -> Vec<String> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(asset, profile, market))
        .map(|rule| rule.reason.to_string())
        .collect()
}
