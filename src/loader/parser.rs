//! Job file parser
//!
//! Parses and validates job definitions. YAML is accepted, and since JSON is
//! valid YAML, so are JSON job files.

use crate::error::{Error, Result, ResultExt};
use crate::loader::types::{JobDefinition, PaginationDefinition};
use std::fs;
use std::path::Path;
use url::Url;

/// Load a job definition from a file
pub fn load_job(path: impl AsRef<Path>) -> Result<JobDefinition> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read job file '{}'", path.display()))?;
    load_job_from_str(&content)
}

/// Load a job definition from a YAML or JSON string
pub fn load_job_from_str(content: &str) -> Result<JobDefinition> {
    let def: JobDefinition = serde_yaml::from_str(content)?;
    validate_job(&def)?;
    Ok(def)
}

/// Validate a job definition
fn validate_job(def: &JobDefinition) -> Result<()> {
    if def.node.name.trim().is_empty() {
        return Err(Error::invalid_value("node.name", "cannot be empty"));
    }

    if def.request.endpoint.is_empty() && def.request.uri.is_none() {
        return Err(Error::missing_field("request.endpoint"));
    }

    if let Some(base_url) = &def.base_url {
        Url::parse(base_url)?;
    }
    if let Some(uri) = &def.request.uri {
        Url::parse(uri)?;
    }

    if def.http.timeout_secs == 0 {
        return Err(Error::invalid_value(
            "http.timeout_secs",
            "must be greater than zero",
        ));
    }
    if let Some(limit) = &def.http.rate_limit {
        if limit.requests_per_second == 0 || limit.burst_size == 0 {
            return Err(Error::invalid_value(
                "http.rate_limit",
                "requests_per_second and burst_size must be greater than zero",
            ));
        }
    }

    match &def.pagination {
        PaginationDefinition::Cursor {
            cursor_param,
            items_path,
            ..
        } => {
            let absolute = def.request.endpoint.starts_with("http://")
                || def.request.endpoint.starts_with("https://");
            if def.base_url.is_none() && def.request.uri.is_none() && !absolute {
                return Err(Error::missing_field("base_url"));
            }
            if cursor_param.is_empty() {
                return Err(Error::invalid_value(
                    "pagination.cursor_param",
                    "cannot be empty",
                ));
            }
            if items_path.is_empty() {
                return Err(Error::invalid_value(
                    "pagination.items_path",
                    "cannot be empty",
                ));
            }
        }
        PaginationDefinition::Analytics { property_name } => {
            if property_name.is_empty() {
                return Err(Error::invalid_value(
                    "pagination.property_name",
                    "cannot be empty",
                ));
            }
        }
    }

    if def.request.body_property.is_some() && def.request.body_parameter.is_none() {
        return Err(Error::invalid_value(
            "request.body_property",
            "requires request.body_parameter",
        ));
    }

    Ok(())
}
