//! Shared derivation helpers: per-campaign unit economics and
//! divide-by-zero-safe rate computation.

use campaign_core::marketing::{Campaign, DemographicSlice};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Campaign-level constants used to turn conversion counts into money.
///
/// Carried next to every demographic slice during aggregation so each slice
/// is priced with its own campaign's figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitEconomics {
    pub cpa: f64,
    pub average_order_value: f64,
}

impl UnitEconomics {
    pub fn of(campaign: &Campaign) -> Self {
        Self {
            cpa: campaign.cpa,
            average_order_value: campaign.average_order_value,
        }
    }

    pub fn spend(&self, conversions: u64) -> f64 {
        conversions as f64 * self.cpa
    }

    pub fn revenue(&self, conversions: u64) -> f64 {
        conversions as f64 * self.average_order_value
    }

    pub fn derive(&self, metric: DerivedMetric, conversions: u64) -> f64 {
        match metric {
            DerivedMetric::Spend => self.spend(conversions),
            DerivedMetric::Revenue => self.revenue(conversions),
        }
    }
}

/// Monetary metric derived from conversions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DerivedMetric {
    Spend,
    #[default]
    Revenue,
}

/// A demographic slice paired with the campaign that owns it.
#[derive(Debug, Clone, Copy)]
pub struct PricedSlice<'a> {
    pub campaign: &'a Campaign,
    pub economics: UnitEconomics,
    pub slice: &'a DemographicSlice,
}

impl PricedSlice<'_> {
    pub fn spend(&self) -> f64 {
        self.economics.spend(self.slice.performance.conversions)
    }

    pub fn revenue(&self) -> f64 {
        self.economics.revenue(self.slice.performance.conversions)
    }
}

/// Every demographic slice of every campaign, in campaign-then-slice order.
pub fn priced_slices(campaigns: &[Campaign]) -> impl Iterator<Item = PricedSlice<'_>> {
    campaigns.iter().flat_map(|campaign| {
        let economics = UnitEconomics::of(campaign);
        campaign
            .demographic_breakdown
            .iter()
            .map(move |slice| PricedSlice {
                campaign,
                economics,
                slice,
            })
    })
}

/// `numerator / denominator`, or `0.0` when the denominator is zero or the
/// result is not finite.
pub fn safe_rate(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let rate = numerator / denominator;
    if rate.is_finite() {
        rate
    } else {
        0.0
    }
}

/// Same as [`safe_rate`], expressed in percent.
pub fn safe_percent(numerator: f64, denominator: f64) -> f64 {
    safe_rate(numerator, denominator) * 100.0
}
