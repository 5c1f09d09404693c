//! Regional points for the bubble map, geocoded through a [`CityCoordinates`] table.

use campaign_core::geo::{CityCoordinates, Coordinates};
use campaign_core::marketing::{Campaign, RegionalPerformance};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Scale applied to `sqrt(value)` to get a bubble radius in meters.
pub const BUBBLE_RADIUS_SCALE: f64 = 400.0;
/// Values strictly above this are [`BubbleBand::High`].
pub const HIGH_BAND_THRESHOLD: f64 = 20_000.0;
/// Values strictly above this (and not high) are [`BubbleBand::Medium`].
pub const MEDIUM_BAND_THRESHOLD: f64 = 10_000.0;

/// A campaign's regional performance with joined coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionPoint {
    #[serde(flatten)]
    pub performance: RegionalPerformance,
    pub lat: f64,
    pub lng: f64,
}

impl RegionPoint {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// One point per campaign-region entry, in campaign order.
///
/// Entries for the same city in different campaigns are not merged. Cities
/// missing from `cities` land on `(0, 0)`.
pub fn aggregate_by_region(campaigns: &[Campaign], cities: &CityCoordinates) -> Vec<RegionPoint> {
    campaigns
        .iter()
        .flat_map(|c| c.regional_performance.iter())
        .map(|perf| {
            let coords = cities.lookup(&perf.region).unwrap_or_else(|| {
                tracing::debug!(region = %perf.region, "No coordinates for region, using origin");
                Coordinates::ORIGIN
            });
            RegionPoint {
                performance: perf.clone(),
                lat: coords.lat,
                lng: coords.lng,
            }
        })
        .collect()
}

/// Metric that sizes and colors the bubbles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BubbleMetric {
    #[default]
    Revenue,
    Spend,
    Clicks,
    Conversions,
    Impressions,
}

impl BubbleMetric {
    pub fn value_of(&self, perf: &RegionalPerformance) -> f64 {
        match self {
            BubbleMetric::Revenue => perf.revenue,
            BubbleMetric::Spend => perf.spend,
            BubbleMetric::Clicks => perf.clicks as f64,
            BubbleMetric::Conversions => perf.conversions as f64,
            BubbleMetric::Impressions => perf.impressions as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BubbleBand {
    High,
    Medium,
    Low,
}

impl BubbleBand {
    pub fn for_value(value: f64) -> Self {
        if value > HIGH_BAND_THRESHOLD {
            BubbleBand::High
        } else if value > MEDIUM_BAND_THRESHOLD {
            BubbleBand::Medium
        } else {
            BubbleBand::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            BubbleBand::High => "rgba(239, 68, 68, 0.6)",
            BubbleBand::Medium => "rgba(234, 179, 8, 0.6)",
            BubbleBand::Low => "rgba(16, 185, 129, 0.6)",
        }
    }
}

/// `sqrt(value) * 400`; negative or non-finite values give a zero radius.
pub fn bubble_radius(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    value.sqrt() * BUBBLE_RADIUS_SCALE
}

/// The map centers on the first point, or on `(0, 0)` without points.
pub fn map_center(points: &[RegionPoint]) -> Coordinates {
    points
        .first()
        .map(RegionPoint::coordinates)
        .unwrap_or(Coordinates::ORIGIN)
}
