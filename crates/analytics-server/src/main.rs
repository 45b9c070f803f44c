//! Portfolio Analytics HTTP Server
//!
//! Axum-based server exposing the analytics pipeline as a JSON API for the
//! dashboard front end.

mod config;
mod handlers;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;
use crate::handlers::{
    advice, dashboard, health_check, list_assets, market_condition, portfolio, risk_metrics,
};
use crate::state::AppState;

fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & data
        .route("/health", get(health_check))
        .route("/api/assets", get(list_assets))

        // Analytics
        .route("/api/risk-metrics", post(risk_metrics))
        .route("/api/market-condition", post(market_condition))
        .route("/api/advice", post(advice))
        .route("/api/portfolio", post(portfolio))
        .route("/api/dashboard", post(dashboard))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;
    let state = AppState::from_config(&config);

    tracing::info!(
        scorer = state.advisor().strategy_name(),
        source = state.source.name(),
        "analytics pipeline ready"
    );

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("portfolio analytics server running on http://{}", config.bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                - Health check");
    tracing::info!("  GET  /api/assets            - Fallback asset snapshot");
    tracing::info!("  POST /api/risk-metrics      - Series volatility, Sharpe, drawdown");
    tracing::info!("  POST /api/market-condition  - Trend, volatility, sentiment");
    tracing::info!("  POST /api/advice            - Per-asset recommendations");
    tracing::info!("  POST /api/portfolio         - Suggested allocation");
    tracing::info!("  POST /api/dashboard         - Full report");

    axum::serve(listener, app(state)).await?;

    Ok(())
}
