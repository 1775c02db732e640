// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the Data API wire shapes (runReport request/response) and the flattened spreadsheet row
// role: model/types
// outputs: Serializable request structs, tolerant response structs, ReportRow + column headers
// invariants: Dimension/metric name order matches COLUMN_HEADERS order; absent rows/rowCount decode as empty/0
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::{Deserialize, Serialize};

pub const DIMENSIONS: [&str; 4] = [
  "date",
  "deviceCategory",
  "sessionSourceMedium",
  "sessionDefaultChannelGroup",
];

pub const METRICS: [&str; 8] = [
  "screenPageViews",
  "sessions",
  "activeUsers",
  "averageSessionDuration",
  "engagedSessions",
  "userEngagementDuration",
  "newUsers",
  "eventCount",
];

pub const PROBE_METRIC: &str = "sessions";

pub const COLUMN_HEADERS: [&str; 12] = [
  "Date",
  "Device Category",
  "Source Medium",
  "Default Channel Group",
  "Views",
  "Sessions",
  "Active Users",
  "Average Session Duration",
  "Engaged Sessions",
  "User Engagement",
  "New Users",
  "Event Count",
];

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct NamedField {
  pub name: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
  pub start_date: String,
  pub end_date: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub dimensions: Vec<NamedField>,
  pub metrics: Vec<NamedField>,
  pub date_ranges: Vec<DateRange>,
  pub limit: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub offset: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct CellValue {
  #[serde(default)]
  pub value: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRowValues {
  #[serde(default)]
  pub dimension_values: Vec<CellValue>,
  #[serde(default)]
  pub metric_values: Vec<CellValue>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
  #[serde(default)]
  pub rows: Vec<ReportRowValues>,
  #[serde(default)]
  pub row_count: u64,
}

/// One flattened spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
  pub date: String,
  pub device_category: String,
  pub source_medium: String,
  pub default_channel_group: String,
  pub views: i64,
  pub sessions: i64,
  pub active_users: i64,
  /// Kept verbatim; the API returns a fractional number of seconds.
  pub average_session_duration: String,
  pub engaged_sessions: i64,
  pub user_engagement: i64,
  pub new_users: i64,
  pub event_count: i64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn request_serializes_in_data_api_shape() {
    let req = ReportRequest {
      dimensions: vec![NamedField { name: "date".into() }],
      metrics: vec![NamedField { name: "sessions".into() }],
      date_ranges: vec![DateRange {
        start_date: "2024-02-01".into(),
        end_date: "2024-02-29".into(),
      }],
      limit: 1000,
      offset: Some(2000),
    };

    let v = serde_json::to_value(&req).unwrap();
    assert_eq!(v["dateRanges"][0]["startDate"], "2024-02-01");
    assert_eq!(v["dimensions"][0]["name"], "date");
    assert_eq!(v["limit"], 1000);
    assert_eq!(v["offset"], 2000);
  }

  #[test]
  fn probe_shape_omits_dimensions_and_offset() {
    let req = ReportRequest {
      dimensions: Vec::new(),
      metrics: vec![NamedField { name: PROBE_METRIC.into() }],
      date_ranges: Vec::new(),
      limit: 1,
      offset: None,
    };
    let v = serde_json::to_value(&req).unwrap();
    assert!(v.get("dimensions").is_none());
    assert!(v.get("offset").is_none());
  }

  #[test]
  fn empty_response_decodes_to_defaults() {
    let r: ReportResponse = serde_json::from_str(r#"{"kind":"analyticsData#runReport"}"#).unwrap();
    assert!(r.rows.is_empty());
    assert_eq!(r.row_count, 0);
  }

  #[test]
  fn response_rows_decode_positionally() {
    let r: ReportResponse = serde_json::from_value(serde_json::json!({
      "rows": [{
        "dimensionValues": [{"value": "20240201"}, {"value": "mobile"}],
        "metricValues": [{"value": "12"}]
      }],
      "rowCount": 1
    }))
    .unwrap();

    assert_eq!(r.row_count, 1);
    assert_eq!(r.rows[0].dimension_values[1].value, "mobile");
    assert_eq!(r.rows[0].metric_values[0].value, "12");
  }

  #[test]
  fn headers_line_up_with_requested_fields() {
    assert_eq!(COLUMN_HEADERS.len(), DIMENSIONS.len() + METRICS.len());
  }
}
