//! API server: serves dashboard views over HTTP and exports Prometheus metrics.

use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use crate::views_rest;
use axum::routing::get;
use axum::Router;
use campaign_core::config::AppConfig;
use std::net::SocketAddr;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the full router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Dashboard views
        .route("/v1/views/demographic", get(views_rest::handle_demographic))
        .route("/v1/views/device", get(views_rest::handle_device))
        .route("/v1/views/region", get(views_rest::handle_region))
        .route("/v1/views/weekly", get(views_rest::handle_weekly))
        .route("/v1/views/dashboard", get(views_rest::handle_dashboard))
        .route(
            "/v1/exports/demographic.csv",
            get(views_rest::handle_demographic_csv),
        )
        .route(
            "/v1/exports/demographic.json",
            get(views_rest::handle_demographic_json),
        )
        // Operational endpoints
        .route("/health", get(rest::health_check))
        .route("/ready", get(rest::readiness))
        .route("/live", get(rest::liveness))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct ApiServer {
    config: AppConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: AppConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = router(self.state.clone());

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        if !self.config.metrics.enabled {
            info!("Metrics exporter disabled");
            return Ok(());
        }

        metrics_exporter_prometheus::PrometheusBuilder::new()
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");
        Ok(())
    }
}
