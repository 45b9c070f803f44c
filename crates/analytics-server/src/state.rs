//! Application State

use std::sync::Arc;

use portfolio_analytics::{Advisor, AssetSource, Dashboard, RiskCalculator, StaticAssetSource};

use crate::config::ServerConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Full analysis pipeline (advisor + series risk)
    pub dashboard: Arc<Dashboard>,

    /// Snapshot used when a request carries no assets
    pub source: Arc<dyn AssetSource>,
}

impl AppState {
    pub fn new(dashboard: Dashboard, source: Arc<dyn AssetSource>) -> Self {
        Self { dashboard: Arc::new(dashboard), source }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        let advisor = Advisor::new(config.scorer.build());
        Self::new(
            Dashboard::new(advisor, RiskCalculator::new()),
            Arc::new(StaticAssetSource::new()),
        )
    }

    pub fn advisor(&self) -> &Advisor {
        self.dashboard.advisor()
    }
}
