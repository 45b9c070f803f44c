//! Domain Models
//!
//! Core data types shared by the analytics pipeline. Statistics are `f64`;
//! money amounts handed in or out by the investor use `rust_decimal`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// An equity quote snapshot produced once per refresh by the data source.
///
/// Missing numeric fields deserialize to zero, matching what the fetch
/// layer hands over when a quote provider omits them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetRecord {
    /// Ticker symbol (e.g., "AAPL"), unique within a snapshot
    pub symbol: String,

    /// Company name
    pub name: String,

    /// Sector label used for the sector distribution
    pub sector: String,

    /// Last traded price
    pub price: f64,

    /// Absolute change since previous close
    pub change: f64,

    /// Percent change since previous close (1.5 means 1.5%)
    pub change_percent: f64,

    pub volume: f64,

    pub market_cap: f64,

    pub pe_ratio: f64,

    /// Annual dividend yield in percent
    pub dividend: f64,

    #[serde(rename = "high52Week")]
    pub high_52_week: f64,

    #[serde(rename = "low52Week")]
    pub low_52_week: f64,

    pub avg_volume: f64,

    /// Systematic-risk coefficient relative to the market
    pub beta: f64,
}

impl AssetRecord {
    /// Create a record with a neutral beta of 1 and every other figure at zero
    pub fn new(
        symbol: impl Into<String>,
        name: impl Into<String>,
        sector: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            name: name.into(),
            sector: sector.into(),
            price,
            beta: 1.0,
            ..Self::default()
        }
    }

    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    pub fn with_change_percent(mut self, change_percent: f64) -> Self {
        self.change_percent = change_percent;
        self
    }

    pub fn with_dividend(mut self, dividend: f64) -> Self {
        self.dividend = dividend;
        self
    }

    pub fn with_pe_ratio(mut self, pe_ratio: f64) -> Self {
        self.pe_ratio = pe_ratio;
        self
    }

    pub fn with_52_week_range(mut self, low: f64, high: f64) -> Self {
        self.low_52_week = low;
        self.high_52_week = high;
        self
    }

    /// Reject records carrying NaN or infinite figures
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("price", self.price),
            ("change", self.change),
            ("changePercent", self.change_percent),
            ("volume", self.volume),
            ("marketCap", self.market_cap),
            ("peRatio", self.pe_ratio),
            ("dividend", self.dividend),
            ("high52Week", self.high_52_week),
            ("low52Week", self.low_52_week),
            ("avgVolume", self.avg_volume),
            ("beta", self.beta),
        ];

        match fields.iter().find(|(_, value)| !value.is_finite()) {
            Some((field, _)) => Err(AnalyticsError::InvalidAsset {
                symbol: self.symbol.clone(),
                field: *field,
            }),
            None => Ok(()),
        }
    }
}

/// Investor risk tolerance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Moderate => "moderate",
            Self::Aggressive => "aggressive",
        }
    }

    /// Scalar fed to the advisory scorer (0 = conservative, 1 = aggressive)
    pub const fn risk_scalar(self) -> f64 {
        match self {
            Self::Conservative => 0.0,
            Self::Moderate => 0.5,
            Self::Aggressive => 1.0,
        }
    }

    /// How strongly the optimizer tilts weights along beta
    pub const fn risk_multiplier(self) -> f64 {
        match self {
            Self::Conservative => 0.7,
            Self::Moderate => 1.0,
            Self::Aggressive => 1.3,
        }
    }

    /// Mean-variance risk-aversion coefficient
    pub const fn risk_aversion(self) -> f64 {
        match self {
            Self::Conservative => 0.8,
            Self::Moderate => 0.5,
            Self::Aggressive => 0.2,
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        // Spanish labels are what the profiling UI historically emitted
        match s.trim().to_lowercase().as_str() {
            "conservative" | "conservador" => Ok(Self::Conservative),
            "moderate" | "moderado" => Ok(Self::Moderate),
            "aggressive" | "agresivo" => Ok(Self::Aggressive),
            other => Err(AnalyticsError::InvalidProfile(format!(
                "unknown risk tolerance '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for RiskTolerance {
    type Error = AnalyticsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Investor profile captured once per session by the profiling flow
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestorProfile {
    pub risk_tolerance: RiskTolerance,

    /// Free-form goal labels; carried through but not scored
    #[serde(default)]
    pub investment_goals: BTreeSet<String>,

    /// Investment horizon in years
    pub time_horizon: u32,

    /// Amount to invest
    pub initial_investment: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_sectors: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_regions: Option<Vec<String>>,
}

impl Default for InvestorProfile {
    fn default() -> Self {
        Self {
            risk_tolerance: RiskTolerance::Moderate,
            investment_goals: BTreeSet::new(),
            time_horizon: 5,
            initial_investment: dec!(10000),
            preferred_sectors: None,
            preferred_regions: None,
        }
    }
}

impl InvestorProfile {
    pub fn new(
        risk_tolerance: RiskTolerance,
        time_horizon: u32,
        initial_investment: Decimal,
    ) -> Result<Self> {
        let profile = Self {
            risk_tolerance,
            time_horizon,
            initial_investment,
            ..Self::default()
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.investment_goals.insert(goal.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.time_horizon == 0 {
            return Err(AnalyticsError::InvalidProfile(
                "time horizon must be at least one year".into(),
            ));
        }
        if self.initial_investment <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidProfile(format!(
                "initial investment must be positive, got {}",
                self.initial_investment
            )));
        }
        Ok(())
    }
}

/// Market-wide direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Bullish,
    Bearish,
    Neutral,
}

/// Cross-sectional dispersion bucket
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatilityLevel {
    High,
    Medium,
    Low,
}

/// Aggregate market reading derived from one asset snapshot
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketCondition {
    pub trend: Trend,
    pub volatility: VolatilityLevel,

    /// Bounded to (-1, 1)
    pub sentiment: f64,
}

/// One line of a portfolio recommendation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockAllocation {
    pub symbol: String,
    pub name: String,

    /// Share of the portfolio in percent
    pub percentage: f64,

    pub sector: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_tolerance_parsing() {
        assert_eq!("Aggressive".parse::<RiskTolerance>().unwrap(), RiskTolerance::Aggressive);
        assert_eq!("moderado".parse::<RiskTolerance>().unwrap(), RiskTolerance::Moderate);
        assert_eq!(" conservador ".parse::<RiskTolerance>().unwrap(), RiskTolerance::Conservative);

        let err = "yolo".parse::<RiskTolerance>().unwrap_err();
        assert_eq!(err.code(), "INVALID_PROFILE");
    }

    #[test]
    fn test_profile_wire_format() {
        let json = r#"{
            "riskTolerance": "aggressive",
            "investmentGoals": ["retirement", "growth"],
            "timeHorizon": 10,
            "initialInvestment": 25000
        }"#;

        let profile: InvestorProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.risk_tolerance, RiskTolerance::Aggressive);
        assert_eq!(profile.time_horizon, 10);
        assert_eq!(profile.initial_investment, dec!(25000));
        assert!(profile.investment_goals.contains("growth"));

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["riskTolerance"], "aggressive");
        assert!(value.get("preferredSectors").is_none());
    }

    #[test]
    fn test_profile_rejects_unknown_tolerance() {
        let json = r#"{"riskTolerance": "reckless", "timeHorizon": 3, "initialInvestment": 1000}"#;
        let err = serde_json::from_str::<InvestorProfile>(json).unwrap_err();
        assert!(err.to_string().contains("Invalid profile"));
    }

    #[test]
    fn test_profile_validation() {
        assert!(InvestorProfile::new(RiskTolerance::Moderate, 5, dec!(1000)).is_ok());
        assert!(InvestorProfile::new(RiskTolerance::Moderate, 0, dec!(1000)).is_err());
        assert!(InvestorProfile::new(RiskTolerance::Moderate, 5, Decimal::ZERO).is_err());
        assert!(InvestorProfile::default().validate().is_ok());
    }

    #[test]
    fn test_asset_wire_format_defaults_missing_fields() {
        let json = r#"{"symbol": "AAPL", "name": "Apple Inc.", "sector": "Technology",
                       "price": 173.5, "changePercent": 1.45, "high52Week": 180.5}"#;

        let asset: AssetRecord = serde_json::from_str(json).unwrap();
        assert_eq!(asset.change_percent, 1.45);
        assert_eq!(asset.high_52_week, 180.5);
        assert_eq!(asset.beta, 0.0);

        let value = serde_json::to_value(&asset).unwrap();
        assert!(value.get("low52Week").is_some());
        assert!(value.get("peRatio").is_some());
    }

    #[test]
    fn test_asset_validation() {
        let asset = AssetRecord::new("aapl", "Apple", "Technology", 170.0);
        assert_eq!(asset.symbol, "AAPL");
        assert!(asset.validate().is_ok());

        let broken = asset.with_beta(f64::NAN);
        assert_eq!(
            broken.validate().unwrap_err(),
            AnalyticsError::InvalidAsset { symbol: "AAPL".into(), field: "beta" }
        );
    }
}
