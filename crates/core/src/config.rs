use crate::geo::{CityCoordinates, Coordinates};
use serde::Deserialize;
use std::path::Path;

/// Name of the optional config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "campaign-insights";

/// Root application configuration. Loaded from an optional TOML file and
/// environment variables with the prefix `CAMPAIGN_INSIGHTS__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub geo: GeoConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Where the marketing dataset is fetched from. A URL wins over a path.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_source_path")]
    pub path: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Extra or replacement city coordinates, merged over the built-in table.
///
/// Entries are a list (`[[geo.cities]]`) rather than a table keyed by city:
/// the config loader lowercases keys, and city lookup is exact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeoConfig {
    #[serde(default)]
    pub cities: Vec<CityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CityEntry {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl CityEntry {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

// Default functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_enabled() -> bool {
    true
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_source_path() -> String {
    "data/marketing.json".to_string()
}
fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
            port: default_metrics_port(),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            path: default_source_path(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional config file and the environment.
    ///
    /// With `file` set the file must exist; otherwise `campaign-insights.toml`
    /// in the working directory is read when present.
    pub fn load(file: Option<&Path>) -> Result<Self, config::ConfigError> {
        tracing::debug!(file = ?file, "Loading configuration");
        let mut builder = config::Config::builder();
        builder = match file {
            Some(path) => builder.add_source(config::File::from(path).required(true)),
            None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let config = builder
            .add_source(
                config::Environment::with_prefix("CAMPAIGN_INSIGHTS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        config.try_deserialize()
    }

    /// City table used by the region view: built-in cities plus configured ones.
    pub fn city_table(&self) -> CityCoordinates {
        let mut table = CityCoordinates::gulf_defaults();
        table.extend(
            self.geo
                .cities
                .iter()
                .map(|city| (city.name.clone(), city.coordinates())),
        );
        table
    }
}
