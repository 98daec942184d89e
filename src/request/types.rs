//! Request description

use crate::types::{JsonObject, JsonValue, Method, StringMap};

/// Description of a single request
///
/// Builder methods consume and return the options, so paginators derive each
/// page's request from a template instead of editing a shared value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Endpoint path, joined onto the executor's base URL
    pub endpoint: String,
    /// Full URI override; when set the endpoint is ignored
    pub uri: Option<String>,
    /// Request headers
    pub headers: StringMap,
    /// Query parameters
    pub query: JsonObject,
    /// JSON body
    pub body: Option<JsonValue>,
}

impl RequestOptions {
    /// Create options for a method and endpoint
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Create GET options
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    /// Create POST options
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    /// Set a full URI override
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Remove a query parameter
    #[must_use]
    pub fn without_query(mut self, key: &str) -> Self {
        self.query.remove(key);
        self
    }

    /// Set the JSON body
    #[must_use]
    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Body to send, `None` when absent or an empty object
    pub fn effective_body(&self) -> Option<&JsonValue> {
        match &self.body {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Object(map)) if map.is_empty() => None,
            Some(body) => Some(body),
        }
    }

    /// Query parameters rendered as string pairs
    ///
    /// `null` values are skipped, arrays are comma-joined.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .iter()
            .filter_map(|(key, value)| render_query_value(value).map(|v| (key.clone(), v)))
            .collect()
    }
}

fn render_query_value(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Array(items) => Some(
            items
                .iter()
                .filter_map(render_query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}
