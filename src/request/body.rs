//! JSON body parameters

use super::types::RequestOptions;
use crate::error::{Error, Result};
use crate::node::ParameterResolver;
use crate::types::{JsonObject, JsonValue};

/// Parse a node parameter as JSON and place it in the request body
///
/// The parameter defaults to `"{}"` when unset. String values are parsed;
/// values that are already structured JSON are used as they are. Without
/// `set_as_body_property` the parsed value replaces the body, otherwise it is
/// set as that property of the existing body object (a non-object body is
/// replaced by a fresh object).
pub fn parse_and_set_body_json(
    request: RequestOptions,
    params: &dyn ParameterResolver,
    parameter_name: &str,
    set_as_body_property: Option<&str>,
) -> Result<RequestOptions> {
    let parsed = match params.parameter(parameter_name) {
        None | Some(JsonValue::Null) => JsonValue::Object(JsonObject::new()),
        Some(JsonValue::String(raw)) => serde_json::from_str(&raw).map_err(|e| {
            Error::node_operation(
                params.node().clone(),
                format!(
                    "The '{parameter_name}' property must be valid JSON, but cannot be parsed: {e}"
                ),
            )
        })?,
        Some(value) => value,
    };

    let body = match set_as_body_property {
        None => parsed,
        Some(property) => {
            let mut body = match request.body.clone() {
                Some(JsonValue::Object(map)) => map,
                _ => JsonObject::new(),
            };
            body.insert(property.to_string(), parsed);
            JsonValue::Object(body)
        }
    };

    Ok(request.with_body(body))
}
