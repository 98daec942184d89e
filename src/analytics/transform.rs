//! Response flattening, merging and filter normalization

use super::types::{Report, ReportRow};
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// Flatten reporting v4 reports into one record per row
///
/// Each declared dimension maps to the row's positional value (`null` when the
/// row is short) and `total` holds the comma-joined values of the first
/// metric. Reports without rows contribute nothing.
pub fn simplify(reports: &[Report]) -> Vec<JsonObject> {
    let mut records = Vec::new();
    for report in reports {
        let Some(rows) = report.data.rows() else {
            continue;
        };
        let dimensions = report.column_header.dimensions();
        records.extend(rows.iter().map(|row| simplify_row(dimensions, row)));
    }
    records
}

fn simplify_row(dimensions: &[String], row: &ReportRow) -> JsonObject {
    let values = row.dimensions();
    let mut record = JsonObject::new();
    for (i, name) in dimensions.iter().enumerate() {
        let value = values.get(i).cloned().map_or(JsonValue::Null, JsonValue::String);
        record.insert(name.clone(), value);
    }
    record.insert("total".to_string(), JsonValue::String(row.total()));
    record
}

/// Flatten a data API response into one record per row
///
/// Header names (`dimensionHeaders[].name`, `metricHeaders[].name`) map to
/// the positional `dimensionValues[].value` / `metricValues[].value` of each
/// row.
pub fn simplify_data_api(response: &JsonValue) -> Vec<JsonObject> {
    let dimension_names = header_names(response, "dimensionHeaders");
    let metric_names = header_names(response, "metricHeaders");

    let Some(rows) = response.get("rows").and_then(JsonValue::as_array) else {
        return Vec::new();
    };

    rows.iter()
        .map(|row| {
            let mut record = JsonObject::new();
            fill_values(&mut record, &dimension_names, row.get("dimensionValues"));
            fill_values(&mut record, &metric_names, row.get("metricValues"));
            record
        })
        .collect()
}

fn header_names(response: &JsonValue, field: &str) -> Vec<String> {
    response
        .get(field)
        .and_then(JsonValue::as_array)
        .map(|headers| {
            headers
                .iter()
                .map(|h| {
                    h.get("name")
                        .and_then(JsonValue::as_str)
                        .unwrap_or_default()
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

fn fill_values(record: &mut JsonObject, names: &[String], values: Option<&JsonValue>) {
    let values = values.and_then(JsonValue::as_array);
    for (i, name) in names.iter().enumerate() {
        let value = values
            .and_then(|v| v.get(i))
            .and_then(|v| v.get("value"))
            .cloned()
            .unwrap_or(JsonValue::Null);
        record.insert(name.clone(), value);
    }
}

/// Merge reports that share a column header into a single report
///
/// The first report's header and data fields are kept; its rows are replaced
/// by the rows of every report in order. Header compatibility is not checked.
pub fn merge(reports: Vec<Report>) -> Vec<Report> {
    let mut reports = reports.into_iter();
    let Some(mut merged) = reports.next() else {
        return Vec::new();
    };

    for report in reports {
        let Some(Some(rows)) = report.data.rows else {
            continue;
        };
        match merged.data.rows.as_mut() {
            Some(Some(existing)) => existing.extend(rows),
            _ => merged.data.rows = Some(Some(rows)),
        }
    }
    vec![merged]
}

/// Normalize filter specs into `{ filter: { fieldName, <type>: spec } }` clauses
///
/// `inListFilter` splits comma-separated `values`; `numericFilter` wraps
/// `value` and `betweenFilter` wraps `fromValue`/`toValue` under the key named
/// by `valueType`. Other filter types pass through.
pub fn process_filters(expression: &JsonObject) -> Result<Vec<JsonValue>> {
    let mut processed = Vec::new();

    for (filter_type, filters) in expression {
        let filters = filters.as_array().ok_or_else(|| {
            Error::decode(format!("filters of type '{filter_type}' must be a list"))
        })?;

        for filter in filters {
            let mut spec = filter.as_object().cloned().ok_or_else(|| {
                Error::decode(format!("'{filter_type}' filter must be an object"))
            })?;
            let field_name = spec.remove("fieldName");

            match filter_type.as_str() {
                "inListFilter" => split_values(&mut spec),
                "numericFilter" => {
                    let value_type = take_value_type(&mut spec, filter_type)?;
                    wrap_typed(&mut spec, "value", &value_type);
                }
                "betweenFilter" => {
                    let value_type = take_value_type(&mut spec, filter_type)?;
                    wrap_typed(&mut spec, "fromValue", &value_type);
                    wrap_typed(&mut spec, "toValue", &value_type);
                }
                _ => {}
            }

            let mut clause = JsonObject::new();
            if let Some(field_name) = field_name {
                clause.insert("fieldName".to_string(), field_name);
            }
            clause.insert(filter_type.clone(), JsonValue::Object(spec));

            let mut wrapper = JsonObject::new();
            wrapper.insert("filter".to_string(), JsonValue::Object(clause));
            processed.push(JsonValue::Object(wrapper));
        }
    }

    Ok(processed)
}

fn split_values(spec: &mut JsonObject) {
    let list = match spec.get("values") {
        Some(JsonValue::String(values)) => values
            .split(',')
            .map(|v| JsonValue::String(v.to_string()))
            .collect(),
        _ => return,
    };
    spec.insert("values".to_string(), JsonValue::Array(list));
}

fn take_value_type(spec: &mut JsonObject, filter_type: &str) -> Result<String> {
    match spec.remove("valueType") {
        Some(JsonValue::String(value_type)) => Ok(value_type),
        _ => Err(Error::decode(format!(
            "'{filter_type}' filter requires a string valueType"
        ))),
    }
}

fn wrap_typed(spec: &mut JsonObject, key: &str, value_type: &str) {
    let value = spec.remove(key).unwrap_or(JsonValue::Null);
    let mut typed = JsonObject::new();
    typed.insert(value_type.to_string(), value);
    spec.insert(key.to_string(), JsonValue::Object(typed));
}
