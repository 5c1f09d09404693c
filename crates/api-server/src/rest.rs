//! Shared REST state, error body and operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use campaign_core::error::CampaignError;
use campaign_ingest::MarketingDataSource;
use campaign_reporting::DashboardAssembler;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, warn};
use utoipa::ToSchema;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MarketingDataSource>,
    pub assembler: Arc<DashboardAssembler>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(source: Arc<dyn MarketingDataSource>, assembler: DashboardAssembler) -> Self {
        Self {
            source,
            assembler: Arc::new(assembler),
            start_time: Instant::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    /// Map a core error to a status and body. Fetch failures are the
    /// upstream's fault and surface as 502.
    pub fn from_error(e: &CampaignError) -> (StatusCode, Json<ErrorResponse>) {
        if e.is_data_unavailable() {
            warn!(error = %e, "Marketing data unavailable");
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "data_unavailable".to_string(),
                    message: e.to_string(),
                }),
            )
        } else {
            error!(error = %e, "Request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Internal processing error".to_string(),
                }),
            )
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub source: String,
    pub uptime_secs: u64,
}

/// GET /health: Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Operations",
    responses((status = 200, description = "Service is healthy", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        source: state.source.describe(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready: Readiness probe. Ready only when the data source answers.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Operations",
    responses(
        (status = 200, description = "Data source reachable"),
        (status = 503, description = "Data source failing"),
    )
)]
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.source.fetch().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// GET /live: Liveness probe.
#[utoipa::path(
    get,
    path = "/live",
    tag = "Operations",
    responses((status = 200, description = "Process is alive"))
)]
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
