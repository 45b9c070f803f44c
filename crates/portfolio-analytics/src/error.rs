//! Error Types for Portfolio Analytics

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Insufficient data: need at least {needed} data points, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Degenerate weights: adjusted weights sum to {sum}")]
    DegenerateWeights { sum: f64 },

    #[error("Invalid price {price} at index {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Invalid asset {symbol}: field '{field}' is not finite")]
    InvalidAsset { symbol: String, field: &'static str },

    #[error("Overflow: {0} exceeds the representable range")]
    Overflow(&'static str),
}

impl AnalyticsError {
    /// Stable machine-readable code for the display layer
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "INSUFFICIENT_DATA",
            Self::EmptyInput(_) => "EMPTY_INPUT",
            Self::InvalidProfile(_) => "INVALID_PROFILE",
            Self::DegenerateWeights { .. } => "DEGENERATE_WEIGHTS",
            Self::InvalidPrice { .. } => "INVALID_PRICE",
            Self::InvalidAsset { .. } => "INVALID_ASSET",
            Self::Overflow(_) => "OVERFLOW",
        }
    }

    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidProfile(msg) => format!("Your investor profile is not valid: {msg}"),
            Self::InsufficientData { .. } | Self::EmptyInput(_) => {
                "Not enough market data is available yet. Please try again later.".into()
            }
            _ => "Market data could not be analyzed right now. Please try again later.".into(),
        }
    }
}
