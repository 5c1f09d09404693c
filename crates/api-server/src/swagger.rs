//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campaign Insights API",
        version = "0.1.0",
        description = "Marketing campaign dashboard views.\n\nPivots the campaign dataset by gender, age group, device, region and week into chart-ready view models.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Views", description = "Dashboard view models"),
        (name = "Exports", description = "Table exports"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Views
        crate::views_rest::handle_demographic,
        crate::views_rest::handle_device,
        crate::views_rest::handle_region,
        crate::views_rest::handle_weekly,
        crate::views_rest::handle_dashboard,
        // Exports
        crate::views_rest::handle_demographic_csv,
        crate::views_rest::handle_demographic_json,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Dataset types
        campaign_core::marketing::Gender,
        campaign_core::marketing::Device,
        campaign_core::marketing::RegionalPerformance,
        campaign_core::geo::Coordinates,
        // Pivots
        campaign_reporting::demographic::GenderTotals,
        campaign_reporting::demographic::DemographicRow,
        campaign_reporting::device::PerformanceTotals,
        campaign_reporting::region::RegionPoint,
        campaign_reporting::region::BubbleMetric,
        campaign_reporting::region::BubbleBand,
        campaign_reporting::export::SortOrder,
        // View models
        campaign_reporting::dashboard::MetricCard,
        campaign_reporting::dashboard::BarDatum,
        campaign_reporting::dashboard::BarChart,
        campaign_reporting::dashboard::TableColumn,
        campaign_reporting::dashboard::DemographicTable,
        campaign_reporting::dashboard::LinePoint,
        campaign_reporting::dashboard::LineChart,
        campaign_reporting::dashboard::BubblePoint,
        campaign_reporting::dashboard::BubbleMap,
        campaign_reporting::dashboard::DemographicView,
        campaign_reporting::dashboard::DeviceSummary,
        campaign_reporting::dashboard::DeviceView,
        campaign_reporting::dashboard::RegionView,
        campaign_reporting::dashboard::WeeklyView,
        campaign_reporting::dashboard::DashboardSnapshot,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_view_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        assert!(paths.iter().any(|p| p.as_str() == "/v1/views/region"));
        assert!(paths.iter().any(|p| p.as_str() == "/v1/exports/demographic.csv"));
        assert!(paths.iter().any(|p| p.as_str() == "/v1/exports/demographic.json"));
        assert!(paths.iter().any(|p| p.as_str() == "/health"));
    }
}
