//! Weekly spend/revenue series.

use campaign_core::marketing::{Campaign, WeeklyPerformance};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeekPoint {
    pub week_label: String,
    pub spend: f64,
    pub revenue: f64,
}

/// `"{week_start} - {week_end}"`.
pub fn week_label(week: &WeeklyPerformance) -> String {
    format!("{} - {}", week.week_start, week.week_end)
}

/// Every campaign's weekly entries, flattened in campaign-then-week order.
///
/// Weeks are deliberately not merged across campaigns: two campaigns
/// reporting the same week produce two points with the same label. The
/// series reads as "all campaigns over time" rather than one total per week.
pub fn aggregate_weekly(campaigns: &[Campaign]) -> Vec<WeekPoint> {
    campaigns
        .iter()
        .flat_map(|c| c.weekly_performance.iter())
        .map(|w| WeekPoint {
            week_label: week_label(w),
            spend: w.spend,
            revenue: w.revenue,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    #[test]
    fn test_shared_week_stays_two_points() {
        let mut a = campaign("A", 1.0, 1.0);
        a.weekly_performance = vec![week("2024-01-01", "2024-01-07", 100.0, 400.0)];
        let mut b = campaign("B", 1.0, 1.0);
        b.weekly_performance = vec![week("2024-01-01", "2024-01-07", 50.0, 150.0)];

        let points = aggregate_weekly(&[a, b]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].week_label, "2024-01-01 - 2024-01-07");
        assert_eq!(points[0].week_label, points[1].week_label);
        assert_eq!(points[0].spend, 100.0);
        assert_eq!(points[1].spend, 50.0);
    }

    #[test]
    fn test_campaign_then_week_order() {
        let points = aggregate_weekly(&two_campaigns());
        let labels: Vec<&str> = points.iter().map(|p| p.week_label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "2024-01-01 - 2024-01-07",
                "2024-01-08 - 2024-01-14",
                "2024-01-01 - 2024-01-07",
            ]
        );
        assert_eq!(points[2].revenue, 900.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_weekly(&[]).is_empty());
    }
}
