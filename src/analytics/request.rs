//! Analytics request construction

use super::types::ApiVersion;
use crate::request::RequestOptions;
use crate::types::{JsonObject, JsonValue, Method};

/// Build a request against the analytics API of `version`
///
/// The URI is the version's base URL joined with `endpoint` unless `uri`
/// overrides it. An empty body or query is left out of the request.
pub fn analytics_request(
    version: ApiVersion,
    method: Method,
    endpoint: &str,
    body: Option<JsonValue>,
    query: JsonObject,
    uri: Option<&str>,
) -> RequestOptions {
    let uri = uri.map_or_else(
        || format!("{}{}", version.base_url(), endpoint),
        str::to_string,
    );

    let mut request = RequestOptions::new(method, endpoint)
        .with_uri(uri)
        .with_header("Accept", "application/json")
        .with_header("Content-Type", "application/json");
    request.query = query;

    match body {
        Some(JsonValue::Object(map)) if map.is_empty() => request,
        Some(JsonValue::Null) | None => request,
        Some(body) => request.with_body(body),
    }
}
