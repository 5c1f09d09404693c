//! Device pivot: Mobile and Desktop totals summed directly from the
//! pre-computed device slices.

use crate::derivation::safe_percent;
use campaign_core::marketing::{Campaign, Device};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Additive performance counters. Rates are not stored; they are recomputed
/// from the summed counters on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PerformanceTotals {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

impl PerformanceTotals {
    /// Click-through rate in percent, `0.0` without impressions.
    pub fn ctr(&self) -> f64 {
        safe_percent(self.clicks as f64, self.impressions as f64)
    }

    /// Conversion rate in percent, `0.0` without clicks.
    pub fn conversion_rate(&self) -> f64 {
        safe_percent(self.conversions as f64, self.clicks as f64)
    }
}

/// The closed set of device buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeviceBreakdown {
    #[serde(rename = "Mobile")]
    pub mobile: PerformanceTotals,
    #[serde(rename = "Desktop")]
    pub desktop: PerformanceTotals,
}

impl DeviceBreakdown {
    pub fn get(&self, device: Device) -> Option<&PerformanceTotals> {
        match device {
            Device::Mobile => Some(&self.mobile),
            Device::Desktop => Some(&self.desktop),
            Device::Other => None,
        }
    }

    fn bucket_mut(&mut self, device: Device) -> Option<&mut PerformanceTotals> {
        match device {
            Device::Mobile => Some(&mut self.mobile),
            Device::Desktop => Some(&mut self.desktop),
            Device::Other => None,
        }
    }

    /// Known buckets in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Device, &PerformanceTotals)> {
        [(Device::Mobile, &self.mobile), (Device::Desktop, &self.desktop)].into_iter()
    }
}

/// Sum every campaign's device slices into the Mobile and Desktop buckets.
/// Slices for any other device are dropped.
pub fn aggregate_by_device(campaigns: &[Campaign]) -> DeviceBreakdown {
    let mut breakdown = DeviceBreakdown::default();

    for perf in campaigns.iter().flat_map(|c| c.device_performance.iter()) {
        let Some(bucket) = breakdown.bucket_mut(perf.device) else {
            continue;
        };
        bucket.impressions += perf.impressions;
        bucket.clicks += perf.clicks;
        bucket.conversions += perf.conversions;
        bucket.spend += perf.spend;
        bucket.revenue += perf.revenue;
    }

    breakdown
}
