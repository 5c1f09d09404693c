//! Campaign reporting: pivots the marketing dataset into per-gender,
//! per-age-group, per-device, per-region and per-week summaries, and
//! assembles them into dashboard view models.

pub mod dashboard;
pub mod demographic;
pub mod derivation;
pub mod device;
pub mod export;
pub mod format;
pub mod region;
pub mod weekly;

#[cfg(test)]
mod fixtures;

pub use dashboard::{DashboardAssembler, DashboardSnapshot};
pub use demographic::{aggregate_by_age_group, aggregate_by_gender, GenderTotals, PivotEntry};
pub use derivation::{safe_rate, DerivedMetric, UnitEconomics};
pub use device::{aggregate_by_device, DeviceBreakdown, PerformanceTotals};
pub use region::{aggregate_by_region, BubbleBand, BubbleMetric, RegionPoint};
pub use weekly::{aggregate_weekly, WeekPoint};
