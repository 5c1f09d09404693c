//! Dashboard view models: composes the pivots into the shapes each widget
//! renders: metric cards, bar charts, tables, the bubble map and line charts.

use crate::demographic::{
    aggregate_by_age_group, aggregate_by_gender, rows_for_gender, DemographicRow, GenderTotals,
    PivotEntry,
};
use crate::derivation::DerivedMetric;
use crate::device::{aggregate_by_device, PerformanceTotals};
use crate::format::{format_count, format_currency_fixed, format_currency_grouped};
use crate::region::{
    aggregate_by_region, bubble_radius, map_center, BubbleBand, BubbleMetric, RegionPoint,
};
use crate::weekly::{aggregate_weekly, WeekPoint};
use campaign_core::geo::{CityCoordinates, Coordinates};
use campaign_core::marketing::{Device, Gender, MarketingData};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

const BLUE: &str = "#3B82F6";
const GREEN: &str = "#10B981";

// ─── Widget shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BarChart {
    pub title: String,
    pub data: Vec<BarDatum>,
}

impl BarChart {
    fn from_pivot(title: &str, pivot: Vec<PivotEntry>, color: &str) -> Self {
        Self {
            title: title.to_string(),
            data: pivot
                .into_iter()
                .map(|e| BarDatum {
                    label: e.label,
                    value: e.value,
                    color: color.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TableColumn {
    pub key: String,
    pub header: String,
    pub sortable: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DemographicTable {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<DemographicRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LinePoint {
    pub week: String,
    pub spend: f64,
    pub revenue: f64,
}

impl From<WeekPoint> for LinePoint {
    fn from(p: WeekPoint) -> Self {
        Self {
            week: p.week_label,
            spend: p.spend,
            revenue: p.revenue,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LineChart {
    pub title: String,
    pub x_key: String,
    pub y_key: String,
    pub stroke: String,
    pub data: Vec<LinePoint>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BubblePoint {
    #[serde(flatten)]
    pub point: RegionPoint,
    pub value: f64,
    pub radius: f64,
    pub band: BubbleBand,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BubbleMap {
    pub metric: BubbleMetric,
    pub label_key: String,
    pub center: Coordinates,
    pub points: Vec<BubblePoint>,
}

// ─── Page views ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DemographicView {
    pub male: GenderTotals,
    pub female: GenderTotals,
    pub cards: Vec<MetricCard>,
    pub spend_by_age_group: BarChart,
    pub revenue_by_age_group: BarChart,
    pub male_table: DemographicTable,
    pub female_table: DemographicTable,
}

/// Device totals with rates recomputed from the summed counters.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeviceSummary {
    pub device: Device,
    #[serde(flatten)]
    pub totals: PerformanceTotals,
    pub ctr: f64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeviceView {
    pub devices: Vec<DeviceSummary>,
    pub cards: Vec<MetricCard>,
    pub revenue_by_device: BarChart,
    pub spend_by_device: BarChart,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegionView {
    pub map: BubbleMap,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WeeklyView {
    pub spend_chart: LineChart,
    pub revenue_chart: LineChart,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardSnapshot {
    pub campaign_count: usize,
    pub demographic: DemographicView,
    pub device: DeviceView,
    pub region: RegionView,
    pub weekly: WeeklyView,
    pub generated_at: DateTime<Utc>,
}

// ─── Assembler ──────────────────────────────────────────────────────────────

/// Builds view models from a fetched dataset. Holds only the city table used
/// for geocoding; every build is a pure function of its input.
#[derive(Debug, Clone)]
pub struct DashboardAssembler {
    cities: CityCoordinates,
}

impl DashboardAssembler {
    pub fn new(cities: CityCoordinates) -> Self {
        Self { cities }
    }

    pub fn cities(&self) -> &CityCoordinates {
        &self.cities
    }

    pub fn demographic_view(&self, data: &MarketingData) -> DemographicView {
        let campaigns = &data.campaigns;
        let male = aggregate_by_gender(campaigns, Gender::Male);
        let female = aggregate_by_gender(campaigns, Gender::Female);

        let mut cards = gender_cards(Gender::Male, &male);
        cards.extend(gender_cards(Gender::Female, &female));

        debug!(campaigns = campaigns.len(), "Assembled demographic view");

        DemographicView {
            male,
            female,
            cards,
            spend_by_age_group: BarChart::from_pivot(
                "Total Spend by Age Group",
                aggregate_by_age_group(campaigns, DerivedMetric::Spend),
                BLUE,
            ),
            revenue_by_age_group: BarChart::from_pivot(
                "Total Revenue by Age Group",
                aggregate_by_age_group(campaigns, DerivedMetric::Revenue),
                GREEN,
            ),
            male_table: demographic_table(data, Gender::Male),
            female_table: demographic_table(data, Gender::Female),
        }
    }

    pub fn device_view(&self, data: &MarketingData) -> DeviceView {
        let breakdown = aggregate_by_device(&data.campaigns);

        let devices: Vec<DeviceSummary> = breakdown
            .iter()
            .map(|(device, totals)| DeviceSummary {
                device,
                totals: *totals,
                ctr: totals.ctr(),
                conversion_rate: totals.conversion_rate(),
            })
            .collect();

        let cards = devices
            .iter()
            .flat_map(|d| {
                let name = d.device.as_str();
                [
                    MetricCard {
                        title: format!("{name} Revenue"),
                        value: format_currency_grouped(d.totals.revenue, 2),
                    },
                    MetricCard {
                        title: format!("{name} Spend"),
                        value: format_currency_grouped(d.totals.spend, 2),
                    },
                    MetricCard {
                        title: format!("{name} Clicks"),
                        value: format_count(d.totals.clicks),
                    },
                ]
            })
            .collect();

        let device_bars = |title: &str, pick: fn(&PerformanceTotals) -> f64| BarChart {
            title: title.to_string(),
            data: devices
                .iter()
                .map(|d| BarDatum {
                    label: d.device.as_str().to_string(),
                    value: pick(&d.totals),
                    color: device_color(d.device).to_string(),
                })
                .collect(),
        };
        let revenue_by_device = device_bars("Revenue by Device", |t| t.revenue);
        let spend_by_device = device_bars("Spend by Device", |t| t.spend);

        debug!(campaigns = data.campaigns.len(), "Assembled device view");

        DeviceView {
            devices,
            cards,
            revenue_by_device,
            spend_by_device,
        }
    }

    pub fn region_view(&self, data: &MarketingData, metric: BubbleMetric) -> RegionView {
        let regions = aggregate_by_region(&data.campaigns, &self.cities);
        let center = map_center(&regions);

        let points: Vec<BubblePoint> = regions
            .into_iter()
            .map(|point| {
                let value = metric.value_of(&point.performance);
                let band = BubbleBand::for_value(value);
                BubblePoint {
                    point,
                    value,
                    radius: bubble_radius(value),
                    band,
                    color: band.color().to_string(),
                }
            })
            .collect();

        debug!(points = points.len(), metric = ?metric, "Assembled region view");

        RegionView {
            map: BubbleMap {
                metric,
                label_key: "region".to_string(),
                center,
                points,
            },
        }
    }

    pub fn weekly_view(&self, data: &MarketingData) -> WeeklyView {
        let series: Vec<LinePoint> = aggregate_weekly(&data.campaigns)
            .into_iter()
            .map(LinePoint::from)
            .collect();

        debug!(points = series.len(), "Assembled weekly view");

        WeeklyView {
            spend_chart: LineChart {
                title: "Weekly Spend".to_string(),
                x_key: "week".to_string(),
                y_key: "spend".to_string(),
                stroke: GREEN.to_string(),
                data: series.clone(),
            },
            revenue_chart: LineChart {
                title: "Weekly Revenue".to_string(),
                x_key: "week".to_string(),
                y_key: "revenue".to_string(),
                stroke: BLUE.to_string(),
                data: series,
            },
        }
    }

    /// Every view at once, with revenue-sized bubbles.
    pub fn snapshot(&self, data: &MarketingData) -> DashboardSnapshot {
        DashboardSnapshot {
            campaign_count: data.campaigns.len(),
            demographic: self.demographic_view(data),
            device: self.device_view(data),
            region: self.region_view(data, BubbleMetric::default()),
            weekly: self.weekly_view(data),
            generated_at: Utc::now(),
        }
    }
}

impl Default for DashboardAssembler {
    fn default() -> Self {
        Self::new(CityCoordinates::gulf_defaults())
    }
}

fn gender_cards(gender: Gender, totals: &GenderTotals) -> Vec<MetricCard> {
    let who = gender.plural();
    vec![
        MetricCard {
            title: format!("Total Clicks by {who}"),
            value: totals.clicks.to_string(),
        },
        MetricCard {
            title: format!("Total Spend by {who}"),
            value: format_currency_fixed(totals.spend, 2),
        },
        MetricCard {
            title: format!("Total Revenue by {who}"),
            value: format_currency_fixed(totals.revenue, 2),
        },
    ]
}

fn demographic_table(data: &MarketingData, gender: Gender) -> DemographicTable {
    let columns = [
        ("campaign_name", "Campaign", true),
        ("age_group", "Age Group", false),
        ("impressions", "Impressions", false),
        ("clicks", "Clicks", false),
        ("conversions", "Conversions", false),
        ("ctr", "CTR (%)", false),
        ("conversion_rate", "Conversion Rate (%)", false),
    ]
    .into_iter()
    .map(|(key, header, sortable)| TableColumn {
        key: key.to_string(),
        header: header.to_string(),
        sortable,
    })
    .collect();

    DemographicTable {
        title: format!("Campaign Performance by {} Age Groups", gender.as_str()),
        columns,
        rows: rows_for_gender(&data.campaigns, gender),
    }
}

fn device_color(device: Device) -> &'static str {
    match device {
        Device::Mobile => BLUE,
        _ => GREEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::*;

    fn dataset() -> MarketingData {
        MarketingData {
            campaigns: two_campaigns(),
        }
    }

    #[test]
    fn test_demographic_view() {
        let view = DashboardAssembler::default().demographic_view(&dataset());
        assert_eq!(view.cards.len(), 6);
        assert_eq!(view.cards[0].title, "Total Clicks by Males");
        assert_eq!(view.cards[0].value, "180");
        assert_eq!(view.cards[1].value, "$90.00");
        assert_eq!(view.cards[5].title, "Total Revenue by Females");
        assert_eq!(view.cards[5].value, "$425.00");

        assert_eq!(view.spend_by_age_group.data.len(), 4);
        assert_eq!(view.spend_by_age_group.data[0].color, BLUE);
        assert_eq!(view.revenue_by_age_group.data[0].color, GREEN);

        assert_eq!(view.male_table.title, "Campaign Performance by Male Age Groups");
        assert_eq!(view.male_table.rows.len(), 3);
        assert_eq!(view.female_table.rows.len(), 2);
        assert!(view.male_table.columns[0].sortable);
    }

    #[test]
    fn test_device_view_recomputes_rates() {
        let view = DashboardAssembler::default().device_view(&dataset());
        assert_eq!(view.devices.len(), 2);
        assert_eq!(view.devices[0].device, Device::Mobile);
        assert_eq!(view.devices[0].ctr, 5.0);
        assert_eq!(view.devices[1].ctr, 2.5);

        let titles: Vec<&str> = view.cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Mobile Revenue",
                "Mobile Spend",
                "Mobile Clicks",
                "Desktop Revenue",
                "Desktop Spend",
                "Desktop Clicks",
            ]
        );
        assert_eq!(view.cards[0].value, "$600");

        assert_eq!(view.revenue_by_device.data[1].value, 775.0);
        assert_eq!(view.spend_by_device.data[0].color, BLUE);
        assert_eq!(view.spend_by_device.data[1].color, GREEN);
    }

    #[test]
    fn test_region_view_bands() {
        let view = DashboardAssembler::default().region_view(&dataset(), BubbleMetric::Revenue);
        let bands: Vec<BubbleBand> = view.map.points.iter().map(|p| p.band).collect();
        assert_eq!(bands, vec![BubbleBand::High, BubbleBand::Low, BubbleBand::Medium]);
        assert_eq!(view.map.center, Coordinates::new(25.276987, 55.296249));
        assert_eq!(view.map.points[1].point.coordinates(), Coordinates::ORIGIN);
        assert_eq!(view.map.points[1].radius, 4000.0f64.sqrt() * 400.0);
    }

    #[test]
    fn test_region_view_with_spend_metric() {
        let view = DashboardAssembler::default().region_view(&dataset(), BubbleMetric::Spend);
        assert_eq!(view.map.metric, BubbleMetric::Spend);
        assert!(view.map.points.iter().all(|p| p.band == BubbleBand::Low));
        assert_eq!(view.map.points[0].value, 300.0);
    }

    #[test]
    fn test_weekly_view() {
        let view = DashboardAssembler::default().weekly_view(&dataset());
        assert_eq!(view.spend_chart.data.len(), 3);
        assert_eq!(view.spend_chart.y_key, "spend");
        assert_eq!(view.revenue_chart.y_key, "revenue");
        assert_eq!(view.revenue_chart.data[0].week, "2024-01-01 - 2024-01-07");
    }

    #[test]
    fn test_empty_dataset_snapshot() {
        let snapshot = DashboardAssembler::default().snapshot(&MarketingData::default());
        assert_eq!(snapshot.campaign_count, 0);
        assert_eq!(snapshot.demographic.cards[1].value, "$0.00");
        assert!(snapshot.demographic.spend_by_age_group.data.is_empty());
        assert!(snapshot.demographic.male_table.rows.is_empty());
        assert_eq!(snapshot.device.devices[0].totals, PerformanceTotals::default());
        assert_eq!(snapshot.device.devices[0].conversion_rate, 0.0);
        assert!(snapshot.region.map.points.is_empty());
        assert_eq!(snapshot.region.map.center, Coordinates::ORIGIN);
        assert!(snapshot.weekly.spend_chart.data.is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let snapshot = DashboardAssembler::default().snapshot(&dataset());
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["campaign_count"], 2);
        assert_eq!(json["device"]["devices"][0]["device"], "Mobile");
        assert_eq!(json["device"]["devices"][0]["impressions"], 6000);
        assert_eq!(json["region"]["map"]["points"][0]["region"], "Dubai");
        assert_eq!(json["region"]["map"]["points"][0]["band"], "high");
    }
}
