//! Demographic pivots: per-gender totals, per-age-group totals and the
//! per-record gender tables.
//!
//! Demographic slices carry volumes only. Spend and revenue are derived per
//! slice from the owning campaign's `cpa` / `average_order_value`.

use crate::derivation::{priced_slices, DerivedMetric};
use campaign_core::marketing::{Campaign, Gender};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GenderTotals {
    pub clicks: u64,
    pub spend: f64,
    pub revenue: f64,
}

/// One bar of an ordered pivot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PivotEntry {
    pub label: String,
    pub value: f64,
}

/// Totals over every slice whose gender matches exactly.
///
/// [`Gender::Other`] is the catch-all for unrecognized literals and is never
/// counted, so asking for it yields zeros.
pub fn aggregate_by_gender(campaigns: &[Campaign], gender: Gender) -> GenderTotals {
    if gender == Gender::Other {
        return GenderTotals::default();
    }

    priced_slices(campaigns)
        .filter(|p| p.slice.gender == gender)
        .fold(GenderTotals::default(), |mut acc, p| {
            acc.clicks += p.slice.performance.clicks;
            acc.spend += p.spend();
            acc.revenue += p.revenue();
            acc
        })
}

/// Derived spend or revenue grouped by age group, across all genders.
///
/// Groups appear in the order their age group is first seen in the input.
pub fn aggregate_by_age_group(campaigns: &[Campaign], metric: DerivedMetric) -> Vec<PivotEntry> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut entries: Vec<PivotEntry> = Vec::new();

    for priced in priced_slices(campaigns) {
        let value = priced
            .economics
            .derive(metric, priced.slice.performance.conversions);
        let age_group = priced.slice.age_group.as_str();
        match index.get(age_group) {
            Some(&i) => entries[i].value += value,
            None => {
                index.insert(age_group, entries.len());
                entries.push(PivotEntry {
                    label: age_group.to_string(),
                    value,
                });
            }
        }
    }

    entries
}

/// Table row for one demographic slice. Rates are the slice's own stored
/// rates, not recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DemographicRow {
    pub campaign_name: String,
    pub age_group: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub ctr: f64,
    pub conversion_rate: f64,
}

/// One row per matching slice, in campaign-then-slice order.
pub fn rows_for_gender(campaigns: &[Campaign], gender: Gender) -> Vec<DemographicRow> {
    if gender == Gender::Other {
        return Vec::new();
    }

    priced_slices(campaigns)
        .filter(|p| p.slice.gender == gender)
        .map(|p| {
            let perf = &p.slice.performance;
            DemographicRow {
                campaign_name: p.campaign.name.clone(),
                age_group: p.slice.age_group.clone(),
                impressions: perf.impressions,
                clicks: perf.clicks,
                conversions: perf.conversions,
                ctr: perf.ctr,
                conversion_rate: perf.conversion_rate,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_single_campaign_scenario() {
        let mut a = campaign("A", 10.0, 50.0);
        a.demographic_breakdown = vec![slice(Gender::Male, "18-24", 100, 5)];
        let totals = aggregate_by_gender(&[a], Gender::Male);
        assert_eq!(
            totals,
            GenderTotals {
                clicks: 100,
                spend: 50.0,
                revenue: 250.0
            }
        );
    }

    #[test]
    fn test_gender_totals_use_owning_campaign_constants() {
        let campaigns = two_campaigns();
        let male = aggregate_by_gender(&campaigns, Gender::Male);
        // A: (5 + 2) * 10, B: 1 * 20
        assert_eq!(male.clicks, 180);
        assert_eq!(male.spend, 90.0);
        assert_eq!(male.revenue, 7.0 * 50.0 + 75.0);

        let female = aggregate_by_gender(&campaigns, Gender::Female);
        assert_eq!(female.clicks, 120);
        assert_eq!(female.spend, 40.0 + 60.0);
        assert_eq!(female.revenue, 200.0 + 225.0);
    }

    #[test]
    fn test_genders_partition_all_known_slices() {
        let campaigns = two_campaigns();
        let male = aggregate_by_gender(&campaigns, Gender::Male);
        let female = aggregate_by_gender(&campaigns, Gender::Female);

        let (spend, revenue) = priced_slices(&campaigns)
            .filter(|p| p.slice.gender != Gender::Other)
            .fold((0.0, 0.0), |(s, r), p| (s + p.spend(), r + p.revenue()));

        assert_eq!(male.spend + female.spend, spend);
        assert_eq!(male.revenue + female.revenue, revenue);
        assert_eq!(aggregate_by_gender(&campaigns, Gender::Other), GenderTotals::default());
    }

    #[test]
    fn test_age_groups_in_first_seen_order() {
        let campaigns = two_campaigns();
        let spend = aggregate_by_age_group(&campaigns, DerivedMetric::Spend);
        let labels: Vec<&str> = spend.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["18-24", "25-34", "35-44", "45-54"]);
        let values: Vec<f64> = spend.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![110.0, 60.0, 180.0, 20.0]);

        let revenue = aggregate_by_age_group(&campaigns, DerivedMetric::Revenue);
        let values: Vec<f64> = revenue.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![475.0, 300.0, 675.0, 75.0]);
    }

    #[test]
    fn test_equal_values_keep_input_order() {
        let mut c = campaign("Tie", 10.0, 10.0);
        c.demographic_breakdown = vec![
            slice(Gender::Female, "55+", 10, 1),
            slice(Gender::Male, "18-24", 10, 1),
        ];
        let pivot = aggregate_by_age_group(&[c], DerivedMetric::Spend);
        assert_eq!(pivot[0].label, "55+");
        assert_eq!(pivot[1].label, "18-24");
    }

    #[test]
    fn test_rows_for_gender() {
        let campaigns = two_campaigns();
        let rows = rows_for_gender(&campaigns, Gender::Male);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].campaign_name, "Summer Sale");
        assert_eq!(rows[0].age_group, "18-24");
        assert_eq!(rows[0].ctr, 10.0);
        assert_eq!(rows[2].campaign_name, "Winter Promo");
        assert_eq!(rows[2].age_group, "45-54");
        assert!(rows_for_gender(&campaigns, Gender::Other).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate_by_gender(&[], Gender::Female), GenderTotals::default());
        assert!(aggregate_by_age_group(&[], DerivedMetric::Revenue).is_empty());
        assert!(rows_for_gender(&[], Gender::Male).is_empty());
    }
}
