//! Report operation of an analytics node

use super::strategy::PageStrategy;
use super::transform::{merge, simplify, simplify_data_api};
use super::types::{ApiVersion, Report};
use crate::error::Result;
use crate::node::ParameterResolver;
use crate::request::{RequestExecutor, RequestOptions};
use crate::types::JsonValue;
use tracing::debug;

/// Run a report query and shape the result the way the node asks for
///
/// Node parameters read at call time:
/// - `apiVersion`: `dataAPI` or the legacy reporting API (default)
/// - `returnAll`: fetch every page instead of the first (default `false`)
/// - `simple`: flatten rows into records (default `true`)
///
/// Reporting results are either simplified or merged into one report; data
/// API results are either simplified or returned as raw responses.
pub async fn fetch_report(
    executor: &dyn RequestExecutor,
    params: &dyn ParameterResolver,
    property_name: &str,
    template: &RequestOptions,
) -> Result<Vec<JsonValue>> {
    let version = ApiVersion::from_parameter(&params.str_parameter("apiVersion", "v4")?);
    let return_all = params.bool_parameter("returnAll", false)?;
    let simple = params.bool_parameter("simple", true)?;
    debug!(node = %params.node(), %version, return_all, simple, "Running report");

    let responses = if return_all {
        PageStrategy::for_version(version, property_name)
            .fetch_all(executor, template)
            .await?
    } else {
        let response = executor.execute(template).await?;
        match version {
            ApiVersion::DataApi => vec![response],
            ApiVersion::ReportingV4 => match response.get(property_name) {
                Some(JsonValue::Array(items)) => items.clone(),
                _ => Vec::new(),
            },
        }
    };

    match version {
        ApiVersion::ReportingV4 => {
            let reports = Report::from_values(&responses)?;
            if simple {
                Ok(simplify(&reports).into_iter().map(JsonValue::Object).collect())
            } else {
                merge(reports).iter().map(Report::to_value).collect()
            }
        }
        ApiVersion::DataApi if simple => Ok(responses
            .iter()
            .flat_map(simplify_data_api)
            .map(JsonValue::Object)
            .collect()),
        ApiVersion::DataApi => Ok(responses),
    }
}
