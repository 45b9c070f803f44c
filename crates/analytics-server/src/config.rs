//! Server Configuration
//!
//! Read from the process environment after `.env` has been loaded.

use std::sync::Arc;

use portfolio_analytics::advisor::{DenseNetwork, HeuristicScorer, ScoringStrategy, DEFAULT_SEED};
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown scorer '{0}': expected 'network' or 'heuristic'")]
    UnknownScorer(String),

    #[error("Invalid SCORER_SEED '{0}': expected an unsigned integer")]
    InvalidSeed(String),
}

/// Which scoring strategy the advisor runs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScorerKind {
    Network { seed: u64 },
    Heuristic,
}

impl ScorerKind {
    pub fn build(self) -> Arc<dyn ScoringStrategy> {
        match self {
            Self::Network { seed } => Arc::new(DenseNetwork::seeded(seed)),
            Self::Heuristic => Arc::new(HeuristicScorer),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub scorer: ScorerKind,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; absent keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        let seed = match lookup("SCORER_SEED") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidSeed(raw))?,
            None => DEFAULT_SEED,
        };

        let scorer = match lookup("SCORER").as_deref().map(str::trim) {
            None | Some("network") => ScorerKind::Network { seed },
            Some("heuristic") => ScorerKind::Heuristic,
            Some(other) => return Err(ConfigError::UnknownScorer(other.to_string())),
        };

        Ok(Self { bind_addr, scorer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.scorer, ScorerKind::Network { seed: DEFAULT_SEED });
    }

    #[test]
    fn test_heuristic_scorer() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("SCORER", "heuristic"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ]))
        .unwrap();
        assert_eq!(config.scorer, ScorerKind::Heuristic);
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.scorer.build().name(), "heuristic");
    }

    #[test]
    fn test_custom_seed() {
        let config = ServerConfig::from_lookup(lookup(&[("SCORER_SEED", "7")])).unwrap();
        assert_eq!(config.scorer, ScorerKind::Network { seed: 7 });
    }

    #[test]
    fn test_rejects_bad_values() {
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("SCORER", "oracle")])),
            Err(ConfigError::UnknownScorer("oracle".into()))
        );
        assert_eq!(
            ServerConfig::from_lookup(lookup(&[("SCORER_SEED", "-1")])),
            Err(ConfigError::InvalidSeed("-1".into()))
        );
    }
}
