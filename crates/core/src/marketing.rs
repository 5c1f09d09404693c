//! Marketing dataset model: campaigns and their nested performance slices.
//!
//! The dataset is fetched once per view, held immutably, and dropped when the
//! view goes away. Slices have no identity outside their owning campaign.

use crate::error::{CampaignError, CampaignResult};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Root aggregate returned by the marketing data source.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct MarketingData {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

impl MarketingData {
    /// Decode a dataset from raw JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> CampaignResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CampaignError::Decode(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub name: String,
    /// Campaign-wide revenue per conversion.
    pub average_order_value: f64,
    /// Campaign-wide cost per acquisition.
    pub cpa: f64,
    #[serde(default)]
    pub demographic_breakdown: Vec<DemographicSlice>,
    #[serde(default)]
    pub device_performance: Vec<DevicePerformance>,
    #[serde(default)]
    pub regional_performance: Vec<RegionalPerformance>,
    #[serde(default)]
    pub weekly_performance: Vec<WeeklyPerformance>,
}

// ─── Demographics ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    Male,
    Female,
    /// Any literal other than the two known genders. Never counted.
    #[serde(other)]
    Other,
}

impl Gender {
    /// Plural label used in dashboard card titles ("Total Clicks by Males").
    pub fn plural(&self) -> &'static str {
        match self {
            Gender::Male => "Males",
            Gender::Female => "Females",
            Gender::Other => "Others",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

/// One gender/age-group cell of a campaign. Carries volumes only; spend and
/// revenue are derived from the owning campaign's unit economics.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DemographicSlice {
    pub gender: Gender,
    pub age_group: String,
    pub performance: SlicePerformance,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SlicePerformance {
    #[serde(default, deserialize_with = "count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "count")]
    pub conversions: u64,
    /// Per-record click-through rate, in percent.
    #[serde(default)]
    pub ctr: f64,
    /// Per-record conversion rate, in percent.
    #[serde(default)]
    pub conversion_rate: f64,
}

// ─── Counts ─────────────────────────────────────────────────────────────────

/// Counts arrive as JSON numbers and are not always integer-formatted
/// (`100.0`). Floats are rounded to the nearest whole count; negative or
/// non-finite values are rejected.
fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative number")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v.is_finite() && v >= 0.0 {
                Ok(v.round() as u64)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

// ─── Devices ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Device {
    Mobile,
    Desktop,
    /// Any device literal outside the closed set. Never counted.
    #[serde(other)]
    Other,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Mobile => "Mobile",
            Device::Desktop => "Desktop",
            Device::Other => "Other",
        }
    }
}

/// Device slice with pre-computed monetary fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DevicePerformance {
    pub device: Device,
    #[serde(default, deserialize_with = "count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "count")]
    pub conversions: u64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub conversion_rate: f64,
    #[serde(default)]
    pub percentage_of_traffic: f64,
}

// ─── Regions ────────────────────────────────────────────────────────────────

/// Performance of one campaign in one region. `region` is a free-text city
/// name; coordinates are joined later from a city table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegionalPerformance {
    pub region: String,
    #[serde(default, deserialize_with = "count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "count")]
    pub conversions: u64,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub conversion_rate: f64,
}

// ─── Weeks ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeeklyPerformance {
    pub week_start: String,
    pub week_end: String,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "campaigns": [{
            "id": 7,
            "name": "Ramadan Sale",
            "average_order_value": 120.5,
            "cpa": 14.0,
            "demographic_breakdown": [
                {"gender": "Male", "age_group": "18-24",
                 "performance": {"impressions": 1000, "clicks": 80, "conversions": 4, "ctr": 8.0, "conversion_rate": 5.0}},
                {"gender": "Nonbinary", "age_group": "25-34",
                 "performance": {"impressions": 10, "clicks": 1, "conversions": 0, "ctr": 10.0, "conversion_rate": 0.0}}
            ],
            "device_performance": [
                {"device": "Tablet", "impressions": 5, "clicks": 1, "conversions": 0,
                 "spend": 1.0, "revenue": 0.0, "ctr": 20.0, "conversion_rate": 0.0, "percentage_of_traffic": 1.0}
            ]
        }]
    }"#;

    #[test]
    fn test_decode_ignores_unknown_fields_and_defaults_missing_arrays() {
        let data = MarketingData::from_json_slice(SAMPLE.as_bytes()).unwrap();
        assert_eq!(data.campaigns.len(), 1);
        let c = &data.campaigns[0];
        assert_eq!(c.name, "Ramadan Sale");
        assert!(c.regional_performance.is_empty());
        assert!(c.weekly_performance.is_empty());
    }

    #[test]
    fn test_unknown_literals_decode_to_other() {
        let data = MarketingData::from_json_slice(SAMPLE.as_bytes()).unwrap();
        let c = &data.campaigns[0];
        assert_eq!(c.demographic_breakdown[0].gender, Gender::Male);
        assert_eq!(c.demographic_breakdown[1].gender, Gender::Other);
        assert_eq!(c.device_performance[0].device, Device::Other);
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = MarketingData::from_json_slice(b"{\"campaigns\": 3}").unwrap_err();
        assert!(matches!(err, CampaignError::Decode(_)));
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn test_float_formatted_counts_decode() {
        let json = r#"{"campaigns": [{
            "name": "Float Counts", "cpa": 10, "average_order_value": 50,
            "demographic_breakdown": [
                {"gender": "Female", "age_group": "25-34",
                 "performance": {"impressions": 1000.0, "clicks": 100.0, "conversions": 5.0}}
            ],
            "device_performance": [
                {"device": "Desktop", "impressions": 800.0, "clicks": 79.6, "conversions": 4}
            ],
            "regional_performance": [
                {"region": "Doha", "impressions": 500.0, "clicks": 40.0, "conversions": 3.0}
            ]
        }]}"#;
        let data = MarketingData::from_json_slice(json.as_bytes()).unwrap();
        let c = &data.campaigns[0];
        let perf = &c.demographic_breakdown[0].performance;
        assert_eq!((perf.impressions, perf.clicks, perf.conversions), (1000, 100, 5));
        assert_eq!(c.device_performance[0].clicks, 80);
        assert_eq!(c.regional_performance[0].conversions, 3);
    }

    #[test]
    fn test_negative_count_is_decode_error() {
        let json = r#"{"campaigns": [{"name": "x", "cpa": 1, "average_order_value": 1,
            "regional_performance": [{"region": "Doha", "clicks": -1}]}]}"#;
        let err = MarketingData::from_json_slice(json.as_bytes()).unwrap_err();
        assert!(matches!(err, CampaignError::Decode(_)));
    }

    #[test]
    fn test_empty_object_is_empty_dataset() {
        let data = MarketingData::from_json_slice(b"{}").unwrap();
        assert!(data.is_empty());
    }
}
