//! Data sources for the marketing dataset: an HTTP endpoint or a local JSON file.
//!
//! A fetch either yields a complete [`MarketingData`] or one descriptive
//! error. Nothing downstream runs on a failed fetch.

use async_trait::async_trait;
use campaign_core::config::SourceConfig;
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::marketing::MarketingData;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Supplies the raw dataset, once per view activation.
#[async_trait]
pub trait MarketingDataSource: Send + Sync {
    async fn fetch(&self) -> CampaignResult<MarketingData>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Fetches the dataset with a GET request.
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> CampaignResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CampaignError::Config(format!("HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn get(&self) -> CampaignResult<MarketingData> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CampaignError::Fetch(format!("GET {}: {e}", self.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CampaignError::Fetch(format!("GET {} returned {status}", self.url)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CampaignError::Fetch(format!("reading body from {}: {e}", self.url)))?;

        MarketingData::from_json_slice(&body)
    }
}

#[async_trait]
impl MarketingDataSource for HttpSource {
    async fn fetch(&self) -> CampaignResult<MarketingData> {
        debug!(url = %self.url, "Fetching marketing data");
        record("http", self.get().await)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Reads the dataset from a JSON file on disk.
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read(&self) -> CampaignResult<MarketingData> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| CampaignError::Fetch(format!("{}: {e}", self.path.display())))?;
        MarketingData::from_json_slice(&bytes)
    }
}

#[async_trait]
impl MarketingDataSource for FileSource {
    async fn fetch(&self) -> CampaignResult<MarketingData> {
        debug!(path = %self.path.display(), "Reading marketing data");
        record("file", self.read().await)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn record(kind: &'static str, result: CampaignResult<MarketingData>) -> CampaignResult<MarketingData> {
    match &result {
        Ok(data) => {
            metrics::counter!("ingest.fetch.success", "source" => kind).increment(1);
            debug!(source = kind, campaigns = data.campaigns.len(), "Marketing data fetched");
        }
        Err(e) => {
            metrics::counter!("ingest.fetch.failure", "source" => kind).increment(1);
            warn!(source = kind, error = %e, "Marketing data fetch failed");
        }
    }
    result
}

/// HTTP when a URL is configured, otherwise the file at `path`.
pub fn source_from_config(config: &SourceConfig) -> CampaignResult<Arc<dyn MarketingDataSource>> {
    let source: Arc<dyn MarketingDataSource> = match &config.url {
        Some(url) => Arc::new(HttpSource::new(
            url.clone(),
            Duration::from_millis(config.timeout_ms),
        )?),
        None => Arc::new(FileSource::new(&config.path)),
    };
    info!(source = %source.describe(), "Marketing data source configured");
    Ok(source)
}
