//! Hand-built campaign fixtures shared by the unit tests.

use campaign_core::marketing::*;

pub fn slice(gender: Gender, age_group: &str, clicks: u64, conversions: u64) -> DemographicSlice {
    DemographicSlice {
        gender,
        age_group: age_group.into(),
        performance: SlicePerformance {
            impressions: clicks * 10,
            clicks,
            conversions,
            ctr: 10.0,
            conversion_rate: if clicks > 0 {
                conversions as f64 / clicks as f64 * 100.0
            } else {
                0.0
            },
        },
    }
}

pub fn device(
    device: Device,
    impressions: u64,
    clicks: u64,
    conversions: u64,
    spend: f64,
    revenue: f64,
) -> DevicePerformance {
    DevicePerformance {
        device,
        impressions,
        clicks,
        conversions,
        spend,
        revenue,
        ctr: 99.0,
        conversion_rate: 99.0,
        percentage_of_traffic: 50.0,
    }
}

pub fn region(name: &str, spend: f64, revenue: f64) -> RegionalPerformance {
    RegionalPerformance {
        region: name.into(),
        impressions: 1000,
        clicks: 50,
        conversions: 5,
        spend,
        revenue,
        ctr: 5.0,
        conversion_rate: 10.0,
    }
}

pub fn week(start: &str, end: &str, spend: f64, revenue: f64) -> WeeklyPerformance {
    WeeklyPerformance {
        week_start: start.into(),
        week_end: end.into(),
        spend,
        revenue,
    }
}

pub fn campaign(name: &str, cpa: f64, average_order_value: f64) -> Campaign {
    Campaign {
        name: name.into(),
        average_order_value,
        cpa,
        demographic_breakdown: vec![],
        device_performance: vec![],
        regional_performance: vec![],
        weekly_performance: vec![],
    }
}

/// Two campaigns with different unit economics and an unknown-gender slice.
pub fn two_campaigns() -> Vec<Campaign> {
    let mut a = campaign("Summer Sale", 10.0, 50.0);
    a.demographic_breakdown = vec![
        slice(Gender::Male, "18-24", 100, 5),
        slice(Gender::Female, "25-34", 80, 4),
        slice(Gender::Male, "25-34", 60, 2),
    ];
    a.device_performance = vec![
        device(Device::Mobile, 6000, 300, 12, 120.0, 600.0),
        device(Device::Desktop, 4000, 100, 8, 80.0, 400.0),
    ];
    a.regional_performance = vec![region("Dubai", 300.0, 25000.0), region("Muscat", 100.0, 4000.0)];
    a.weekly_performance = vec![
        week("2024-01-01", "2024-01-07", 100.0, 500.0),
        week("2024-01-08", "2024-01-14", 110.0, 520.0),
    ];

    let mut b = campaign("Winter Promo", 20.0, 75.0);
    b.demographic_breakdown = vec![
        slice(Gender::Female, "18-24", 40, 3),
        slice(Gender::Other, "35-44", 30, 9),
        slice(Gender::Male, "45-54", 20, 1),
    ];
    b.device_performance = vec![
        device(Device::Desktop, 2000, 50, 5, 100.0, 375.0),
        device(Device::Other, 500, 10, 1, 20.0, 75.0),
    ];
    b.regional_performance = vec![region("Dubai", 200.0, 15000.0)];
    b.weekly_performance = vec![week("2024-01-01", "2024-01-07", 200.0, 900.0)];

    vec![a, b]
}
