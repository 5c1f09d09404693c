//! Marketing data sources: the single fetch that feeds every dashboard view.

pub mod source;

pub use source::{source_from_config, FileSource, HttpSource, MarketingDataSource};
