use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Marketing data fetch failed: {0}")]
    Fetch(String),

    #[error("Marketing data is malformed: {0}")]
    Decode(String),

    #[error("Report export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl CampaignError {
    /// True for failures of the upstream data fetch, as opposed to local
    /// processing errors. Presentation layers surface these to the user.
    pub fn is_data_unavailable(&self) -> bool {
        matches!(self, CampaignError::Fetch(_) | CampaignError::Decode(_))
    }
}

impl From<config::ConfigError> for CampaignError {
    fn from(e: config::ConfigError) -> Self {
        CampaignError::Config(e.to_string())
    }
}
