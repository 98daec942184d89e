//! Analytics API versions and reporting v4 response types

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Base URL of the data API
pub const DATA_API_BASE_URL: &str = "https://analyticsdata.googleapis.com";

/// Base URL of the legacy reporting API
pub const REPORTING_API_BASE_URL: &str = "https://analyticsreporting.googleapis.com";

/// Upstream analytics API a node talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApiVersion {
    /// Data API: offset/row-count pagination
    #[serde(rename = "dataAPI")]
    DataApi,
    /// Legacy reporting v4 API: page-token pagination
    #[default]
    #[serde(rename = "v4", alias = "universal")]
    ReportingV4,
}

impl ApiVersion {
    /// Resolve the `apiVersion` node parameter
    ///
    /// Only `dataAPI` selects the data API; every other value means the legacy
    /// reporting API.
    pub fn from_parameter(value: &str) -> Self {
        if value == "dataAPI" {
            Self::DataApi
        } else {
            Self::ReportingV4
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Self::DataApi => DATA_API_BASE_URL,
            Self::ReportingV4 => REPORTING_API_BASE_URL,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataApi => f.write_str("dataAPI"),
            Self::ReportingV4 => f.write_str("v4"),
        }
    }
}

/// One report of a reporting v4 response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub column_header: ColumnHeader,
    pub data: ReportData,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Column header of a report
///
/// Optional list fields are `None` when the key is absent and `Some(None)`
/// when it is an explicit `null`, so a decoded report encodes back to the
/// same JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeader {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Option<Vec<String>>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportData {
    /// Absent or null when the report slice has no data
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub rows: Option<Option<Vec<ReportRow>>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub metrics: Option<Option<Vec<DateRangeValues>>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Metric values of one date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRangeValues {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub values: Option<Option<Vec<String>>>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

/// Present keys deserialize to `Some`, keeping an explicit `null` as `Some(None)`
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Report {
    /// Decode one report
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        Self::deserialize(value).map_err(|e| Error::decode(format!("malformed report: {e}")))
    }

    /// Decode a list of reports, failing on the first malformed one
    pub fn from_values(values: &[JsonValue]) -> Result<Vec<Self>> {
        values.iter().map(Self::from_value).collect()
    }

    /// Encode back into JSON
    pub fn to_value(&self) -> Result<JsonValue> {
        Ok(serde_json::to_value(self)?)
    }
}

impl ColumnHeader {
    /// Declared dimension names, empty when absent or null
    pub fn dimensions(&self) -> &[String] {
        self.dimensions.as_ref().and_then(Option::as_deref).unwrap_or(&[])
    }
}

impl ReportData {
    /// Rows of the report, `None` when absent or null
    pub fn rows(&self) -> Option<&[ReportRow]> {
        self.rows.as_ref().and_then(Option::as_deref)
    }
}

impl ReportRow {
    /// Dimension values of the row, empty when absent or null
    pub fn dimensions(&self) -> &[String] {
        self.dimensions.as_ref().and_then(Option::as_deref).unwrap_or(&[])
    }

    /// First metric's values joined with commas
    pub fn total(&self) -> String {
        self.metrics
            .as_ref()
            .and_then(Option::as_deref)
            .and_then(<[DateRangeValues]>::first)
            .and_then(|m| m.values.as_ref().and_then(Option::as_deref))
            .map(|values| values.join(","))
            .unwrap_or_default()
    }
}
