//! Campaign Insights: marketing campaign dashboard backend.
//!
//! Serves the dashboard view models over HTTP, or renders a single view to
//! stdout for offline use.

use campaign_api::rest::AppState;
use campaign_api::ApiServer;
use campaign_core::config::{AppConfig, SourceConfig};
use campaign_ingest::source_from_config;
use campaign_reporting::{BubbleMetric, DashboardAssembler};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "campaign-insights")]
#[command(about = "Marketing campaign dashboard backend")]
#[command(version)]
struct Cli {
    /// Config file (TOML). Defaults to ./campaign-insights.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// URL of the marketing data endpoint (overrides config)
    #[arg(long, global = true)]
    source_url: Option<String>,

    /// Path to a marketing data JSON file (overrides config; ignored when
    /// --source-url is also given)
    #[arg(long, global = true)]
    source_path: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve dashboard views over HTTP (default)
    Serve {
        /// HTTP port (overrides config)
        #[arg(long, env = "CAMPAIGN_INSIGHTS__API__HTTP_PORT")]
        http_port: Option<u16>,
    },
    /// Fetch the dataset once and print one view as JSON
    Render {
        #[arg(value_enum)]
        view: View,

        /// Bubble metric for the region view
        #[arg(long, value_enum, default_value_t = MetricArg::Revenue)]
        metric: MetricArg,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum View {
    Demographic,
    Device,
    Region,
    Weekly,
    Dashboard,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum MetricArg {
    Revenue,
    Spend,
    Clicks,
    Conversions,
    Impressions,
}

impl From<MetricArg> for BubbleMetric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Revenue => BubbleMetric::Revenue,
            MetricArg::Spend => BubbleMetric::Spend,
            MetricArg::Clicks => BubbleMetric::Clicks,
            MetricArg::Conversions => BubbleMetric::Conversions,
            MetricArg::Impressions => BubbleMetric::Impressions,
        }
    }
}

/// A URL always wins over a path. A path given on its own replaces any
/// configured URL.
fn apply_source_overrides(source: &mut SourceConfig, url: Option<String>, path: Option<String>) {
    match (url, path) {
        (Some(url), path) => {
            source.url = Some(url);
            if let Some(path) = path {
                source.path = path;
            }
        }
        (None, Some(path)) => {
            source.url = None;
            source.path = path;
        }
        (None, None) => {}
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Render writes JSON to stdout; keep logs on stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_insights=info,campaign_api=info,tower_http=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    // Load configuration
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.config.is_some() => return Err(e.into()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }
    };

    // Apply CLI overrides
    apply_source_overrides(&mut config.source, cli.source_url, cli.source_path);

    let source = source_from_config(&config.source)?;
    let assembler = DashboardAssembler::new(config.city_table());

    match cli.command.unwrap_or(Command::Serve { http_port: None }) {
        Command::Serve { http_port } => {
            if let Some(port) = http_port {
                config.api.http_port = port;
            }

            info!(
                http_port = config.api.http_port,
                metrics_port = config.metrics.port,
                cities = assembler.cities().len(),
                "Configuration loaded"
            );

            let server = ApiServer::new(config.clone(), AppState::new(source, assembler));

            if let Err(e) = server.start_metrics().await {
                error!(error = %e, "Failed to start metrics exporter");
            }

            info!("Campaign Insights is ready to serve dashboards");
            server.start_http().await?;
        }
        Command::Render { view, metric } => {
            let data = source.fetch().await?;
            info!(campaigns = data.campaigns.len(), view = ?view, "Rendering view");

            let json = match view {
                View::Demographic => serde_json::to_string_pretty(&assembler.demographic_view(&data))?,
                View::Device => serde_json::to_string_pretty(&assembler.device_view(&data))?,
                View::Region => {
                    serde_json::to_string_pretty(&assembler.region_view(&data, metric.into()))?
                }
                View::Weekly => serde_json::to_string_pretty(&assembler.weekly_view(&data))?,
                View::Dashboard => serde_json::to_string_pretty(&assembler.snapshot(&data))?,
            };
            println!("{json}");
        }
    }

    Ok(())
}
