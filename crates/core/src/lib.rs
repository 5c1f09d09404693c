pub mod config;
pub mod error;
pub mod geo;
pub mod marketing;

pub use config::AppConfig;
pub use error::{CampaignError, CampaignResult};
pub use geo::{CityCoordinates, Coordinates};
pub use marketing::MarketingData;
