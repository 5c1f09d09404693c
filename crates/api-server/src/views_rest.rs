//! Dashboard view endpoints. Each request fetches the dataset once and
//! assembles the requested view from it.

use crate::rest::{AppState, ErrorResponse};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use campaign_core::marketing::{Gender, MarketingData};
use campaign_reporting::dashboard::{
    DashboardSnapshot, DemographicView, DeviceView, RegionView, WeeklyView,
};
use campaign_reporting::demographic::{rows_for_gender, DemographicRow};
use campaign_reporting::export::{export_csv, export_json, sort_by_campaign, SortOrder};
use campaign_reporting::BubbleMetric;
use serde::Deserialize;
use utoipa::IntoParams;

type ApiError = (StatusCode, Json<ErrorResponse>);

async fn load(state: &AppState, view: &'static str) -> Result<MarketingData, ApiError> {
    metrics::counter!("views.requests", "view" => view).increment(1);
    state.source.fetch().await.map_err(|e| {
        metrics::counter!("views.fetch_failures", "view" => view).increment(1);
        ErrorResponse::from_error(&e)
    })
}

/// GET /v1/views/demographic: Gender cards, age-group bars and gender tables.
#[utoipa::path(
    get,
    path = "/v1/views/demographic",
    tag = "Views",
    responses(
        (status = 200, description = "Demographic view", body = DemographicView),
        (status = 502, description = "Marketing data unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_demographic(
    State(state): State<AppState>,
) -> Result<Json<DemographicView>, ApiError> {
    let data = load(&state, "demographic").await?;
    Ok(Json(state.assembler.demographic_view(&data)))
}

/// GET /v1/views/device: Mobile vs Desktop totals and bars.
#[utoipa::path(
    get,
    path = "/v1/views/device",
    tag = "Views",
    responses(
        (status = 200, description = "Device view", body = DeviceView),
        (status = 502, description = "Marketing data unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_device(State(state): State<AppState>) -> Result<Json<DeviceView>, ApiError> {
    let data = load(&state, "device").await?;
    Ok(Json(state.assembler.device_view(&data)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RegionQuery {
    /// Metric that sizes the bubbles. Defaults to revenue.
    pub metric: Option<BubbleMetric>,
}

/// GET /v1/views/region: Geocoded bubble map.
#[utoipa::path(
    get,
    path = "/v1/views/region",
    tag = "Views",
    params(RegionQuery),
    responses(
        (status = 200, description = "Region view", body = RegionView),
        (status = 502, description = "Marketing data unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_region(
    State(state): State<AppState>,
    Query(query): Query<RegionQuery>,
) -> Result<Json<RegionView>, ApiError> {
    let data = load(&state, "region").await?;
    let metric = query.metric.unwrap_or_default();
    Ok(Json(state.assembler.region_view(&data, metric)))
}

/// GET /v1/views/weekly: Weekly spend and revenue line charts.
#[utoipa::path(
    get,
    path = "/v1/views/weekly",
    tag = "Views",
    responses(
        (status = 200, description = "Weekly view", body = WeeklyView),
        (status = 502, description = "Marketing data unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_weekly(State(state): State<AppState>) -> Result<Json<WeeklyView>, ApiError> {
    let data = load(&state, "weekly").await?;
    Ok(Json(state.assembler.weekly_view(&data)))
}

/// GET /v1/views/dashboard: All views from a single fetch.
#[utoipa::path(
    get,
    path = "/v1/views/dashboard",
    tag = "Views",
    responses(
        (status = 200, description = "Every dashboard view", body = DashboardSnapshot),
        (status = 502, description = "Marketing data unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let data = load(&state, "dashboard").await?;
    Ok(Json(state.assembler.snapshot(&data)))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DemographicExportQuery {
    pub gender: Gender,
    /// Order of rows by campaign name. Input order when absent.
    pub sort: Option<SortOrder>,
}

/// GET /v1/exports/demographic.csv: One gender's table as CSV.
#[utoipa::path(
    get,
    path = "/v1/exports/demographic.csv",
    tag = "Exports",
    params(DemographicExportQuery),
    responses(
        (status = 200, description = "CSV table", content_type = "text/csv"),
        (status = 502, description = "Marketing data unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_demographic_csv(
    State(state): State<AppState>,
    Query(query): Query<DemographicExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = export_rows(&state, "demographic_csv", &query).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        export_csv(&rows),
    ))
}

/// GET /v1/exports/demographic.json: One gender's table as a JSON array.
#[utoipa::path(
    get,
    path = "/v1/exports/demographic.json",
    tag = "Exports",
    params(DemographicExportQuery),
    responses(
        (status = 200, description = "JSON table, keys in column order", content_type = "application/json"),
        (status = 502, description = "Marketing data unavailable", body = ErrorResponse),
    )
)]
pub async fn handle_demographic_json(
    State(state): State<AppState>,
    Query(query): Query<DemographicExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = export_rows(&state, "demographic_json", &query).await?;
    let body = export_json(&rows).map_err(|e| ErrorResponse::from_error(&e))?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

async fn export_rows(
    state: &AppState,
    view: &'static str,
    query: &DemographicExportQuery,
) -> Result<Vec<DemographicRow>, ApiError> {
    let data = load(state, view).await?;
    let mut rows = rows_for_gender(&data.campaigns, query.gender);
    if let Some(order) = query.sort {
        sort_by_campaign(&mut rows, order);
    }
    Ok(rows)
}
