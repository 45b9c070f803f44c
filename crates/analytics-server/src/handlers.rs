//! HTTP Handlers

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use portfolio_analytics::{
    analysis::RiskWarning, analyze_market_conditions, AdvisoryRecommendation, AnalyticsError,
    AssetRecord, DashboardReport, InvestorProfile, MarketCondition, PortfolioOptimizer,
    PortfolioRecommendation, RiskMetricsResult,
};

use crate::state::AppState;

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;
type Body<T> = Result<Json<T>, JsonRejection>;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub scorer: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Wraps every analysis result with a request id and timestamp
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub analysis_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub result: T,
}

impl<T> Envelope<T> {
    fn wrap(result: T) -> Json<Self> {
        Json(Self { analysis_id: Uuid::new_v4(), generated_at: Utc::now(), result })
    }
}

#[derive(Debug, Deserialize)]
pub struct RiskMetricsRequest {
    pub prices: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct WarningView {
    pub code: RiskWarning,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetricsResponse {
    pub metrics: RiskMetricsResult,
    pub warnings: Vec<WarningView>,
}

#[derive(Debug, Deserialize)]
pub struct MarketConditionRequest {
    pub assets: Vec<AssetRecord>,
}

/// Profiles arrive untyped so a bad field maps to `INVALID_PROFILE`
#[derive(Debug, Deserialize)]
pub struct ProfiledRequest {
    pub assets: Vec<AssetRecord>,
    #[serde(default)]
    pub profile: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub market_condition: MarketCondition,
    pub recommendations: BTreeMap<String, AdvisoryRecommendation>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub assets: Option<Vec<AssetRecord>>,
    #[serde(default)]
    pub profile: Option<Value>,
}

// ============================================================================
// Error Mapping
// ============================================================================

fn status_for(err: &AnalyticsError) -> StatusCode {
    match err {
        AnalyticsError::InvalidProfile(_)
        | AnalyticsError::InvalidPrice { .. }
        | AnalyticsError::InvalidAsset { .. } => StatusCode::BAD_REQUEST,
        AnalyticsError::InsufficientData { .. }
        | AnalyticsError::EmptyInput(_)
        | AnalyticsError::DegenerateWeights { .. }
        | AnalyticsError::Overflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn analysis_error(err: &AnalyticsError) -> ApiError {
    tracing::warn!(code = err.code(), "analysis failed: {}", err);
    (
        status_for(err),
        Json(ErrorResponse { error: err.user_message(), code: err.code().into() }),
    )
}

fn rejection_error(rejection: &JsonRejection) -> ApiError {
    tracing::warn!(status = %rejection.status(), "rejected request body: {}", rejection.body_text());
    (
        rejection.status(),
        Json(ErrorResponse { error: rejection.body_text(), code: "INVALID_REQUEST".into() }),
    )
}

/// Absent profile means the default one; anything else must parse and validate
fn parse_profile(raw: Option<Value>) -> Result<InvestorProfile, ApiError> {
    let profile = match raw {
        None => InvestorProfile::default(),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| analysis_error(&AnalyticsError::InvalidProfile(e.to_string())))?,
    };
    profile.validate().map_err(|e| analysis_error(&e))?;
    Ok(profile)
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        scorer: state.advisor().strategy_name().to_string(),
        source: state.source.name().to_string(),
    })
}

/// Current snapshot from the configured source
pub async fn list_assets(State(state): State<AppState>) -> ApiResult<Vec<AssetRecord>> {
    let assets = state.source.fetch_assets().await.map_err(|e| analysis_error(&e))?;
    Ok(Envelope::wrap(assets))
}

pub async fn risk_metrics(
    State(state): State<AppState>,
    payload: Body<RiskMetricsRequest>,
) -> ApiResult<RiskMetricsResponse> {
    let Json(payload) = payload.map_err(|e| rejection_error(&e))?;
    let metrics = state
        .dashboard
        .risk_calculator()
        .calculate(&payload.prices)
        .map_err(|e| analysis_error(&e))?;

    let warnings = metrics
        .warnings()
        .into_iter()
        .map(|code| WarningView { code, message: code.message() })
        .collect();

    Ok(Envelope::wrap(RiskMetricsResponse { metrics, warnings }))
}

pub async fn market_condition(payload: Body<MarketConditionRequest>) -> ApiResult<MarketCondition> {
    let Json(payload) = payload.map_err(|e| rejection_error(&e))?;
    let condition = analyze_market_conditions(&payload.assets).map_err(|e| analysis_error(&e))?;
    Ok(Envelope::wrap(condition))
}

pub async fn advice(
    State(state): State<AppState>,
    payload: Body<ProfiledRequest>,
) -> ApiResult<AdviceResponse> {
    let Json(payload) = payload.map_err(|e| rejection_error(&e))?;
    let profile = parse_profile(payload.profile)?;

    let market_condition =
        analyze_market_conditions(&payload.assets).map_err(|e| analysis_error(&e))?;
    let recommendations = state
        .advisor()
        .recommend_all(&payload.assets, &profile, &market_condition)
        .map_err(|e| analysis_error(&e))?;

    Ok(Envelope::wrap(AdviceResponse { market_condition, recommendations }))
}

pub async fn portfolio(payload: Body<ProfiledRequest>) -> ApiResult<PortfolioRecommendation> {
    let Json(payload) = payload.map_err(|e| rejection_error(&e))?;
    let profile = parse_profile(payload.profile)?;

    let recommendation = PortfolioOptimizer::new(profile)
        .optimize(&payload.assets)
        .map_err(|e| analysis_error(&e))?;

    Ok(Envelope::wrap(recommendation))
}

/// Full refresh; falls back to the configured source when no assets are sent
pub async fn dashboard(
    State(state): State<AppState>,
    payload: Body<DashboardRequest>,
) -> ApiResult<DashboardReport> {
    let Json(payload) = payload.map_err(|e| rejection_error(&e))?;
    let profile = parse_profile(payload.profile)?;

    let assets = match payload.assets {
        Some(assets) => assets,
        None => {
            tracing::debug!(source = state.source.name(), "no assets in request, using source");
            state.source.fetch_assets().await.map_err(|e| analysis_error(&e))?
        }
    };

    let report = state
        .dashboard
        .analyze(&assets, &profile)
        .map_err(|e| analysis_error(&e))?;

    Ok(Envelope::wrap(report))
}
