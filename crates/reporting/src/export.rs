//! Table sorting and CSV / JSON export of dashboard tables.

use crate::demographic::DemographicRow;
use campaign_core::error::CampaignResult;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// A row that can be laid out as table cells.
pub trait TableRow {
    /// Column keys, in display order.
    const COLUMNS: &'static [&'static str];

    /// One cell per column, in the same order as [`TableRow::COLUMNS`].
    fn cells(&self) -> Vec<serde_json::Value>;
}

impl TableRow for DemographicRow {
    const COLUMNS: &'static [&'static str] = &[
        "campaign_name",
        "age_group",
        "impressions",
        "clicks",
        "conversions",
        "ctr",
        "conversion_rate",
    ];

    fn cells(&self) -> Vec<serde_json::Value> {
        vec![
            serde_json::json!(self.campaign_name),
            serde_json::json!(self.age_group),
            serde_json::json!(self.impressions),
            serde_json::json!(self.clicks),
            serde_json::json!(self.conversions),
            serde_json::json!(self.ctr),
            serde_json::json!(self.conversion_rate),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Stable sort by campaign name; rows of the same campaign keep their order.
pub fn sort_by_campaign(rows: &mut [DemographicRow], order: SortOrder) {
    match order {
        SortOrder::Ascending => rows.sort_by(|a, b| a.campaign_name.cmp(&b.campaign_name)),
        SortOrder::Descending => rows.sort_by(|a, b| b.campaign_name.cmp(&a.campaign_name)),
    }
}

/// Header line plus one line per row. Strings are quoted with `"` doubled.
pub fn export_csv<T: TableRow>(rows: &[T]) -> String {
    let mut csv = T::COLUMNS.join(",");
    csv.push('\n');
    for row in rows {
        let cells: Vec<String> = row
            .cells()
            .iter()
            .map(|v| match v {
                serde_json::Value::String(s) => format!("\"{}\"", s.replace('"', "\"\"")),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    csv
}

/// One row as a JSON object whose keys follow [`TableRow::COLUMNS`].
struct Record {
    columns: &'static [&'static str],
    cells: Vec<serde_json::Value>,
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(&self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// Pretty-printed JSON array with one object per row, keys in column order.
pub fn export_json<T: TableRow>(rows: &[T]) -> CampaignResult<String> {
    let records: Vec<Record> = rows
        .iter()
        .map(|row| Record {
            columns: T::COLUMNS,
            cells: row.cells(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
