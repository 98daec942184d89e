//! Loader types
//!
//! Declarative job definition types for YAML/JSON parsing.

use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::node::{NodeIdentity, NodeParameters};
use crate::pagination::CursorPaginator;
use crate::request::RequestOptions;
use crate::types::{BackoffType, JsonObject, JsonValue, Method, StringMap};
use serde::{Deserialize, Serialize};
use std::time::Duration;

// ============================================================================
// Job Definition
// ============================================================================

/// One paginated fetch run on behalf of a node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JobDefinition {
    /// Node the requests are issued for
    pub node: NodeIdentity,
    /// Base URL joined with relative endpoints
    #[serde(default)]
    pub base_url: Option<String>,
    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpDefinition,
    /// Node parameters (`returnAll`, `apiVersion`, `simple`, ...)
    #[serde(default)]
    pub parameters: JsonObject,
    /// Request template
    pub request: RequestDefinition,
    /// How the request is paginated
    pub pagination: PaginationDefinition,
}

impl JobDefinition {
    /// Parameter resolver over the job's node parameters
    pub fn node_parameters(&self) -> NodeParameters {
        NodeParameters::from_map(self.node.clone(), self.parameters.clone())
    }
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HttpDefinition {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Maximum retries
    #[serde(default = "default_retries")]
    pub max_retries: u32,
    /// Backoff between retries
    #[serde(default)]
    pub backoff: BackoffType,
    /// First backoff delay in milliseconds
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,
    /// Backoff ceiling in milliseconds
    #[serde(default = "default_max_backoff")]
    pub max_backoff_ms: u64,
    /// Client-side rate limit; none when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
    /// Static bearer token
    #[serde(default)]
    pub bearer_token: Option<String>,
    /// User agent
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_ms: default_max_backoff(),
            rate_limit: None,
            headers: StringMap::new(),
            bearer_token: None,
            user_agent: None,
        }
    }
}

impl HttpDefinition {
    /// Client configuration for this definition
    pub fn client_config(&self, base_url: Option<&str>) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        builder = match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };
        if let Some(url) = base_url {
            builder = builder.base_url(url);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        if let Some(token) = &self.bearer_token {
            builder = builder.bearer_token(token);
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_retries() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    100
}

fn default_max_backoff() -> u64 {
    60_000
}

// ============================================================================
// Request Definition
// ============================================================================

/// Request template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RequestDefinition {
    /// HTTP method
    #[serde(default)]
    pub method: Method,
    /// Endpoint path
    #[serde(default)]
    pub endpoint: String,
    /// Full URI override
    #[serde(default)]
    pub uri: Option<String>,
    /// Query parameters
    #[serde(default)]
    pub query: JsonObject,
    /// JSON body
    #[serde(default)]
    pub body: Option<JsonValue>,
    /// Request headers
    #[serde(default)]
    pub headers: StringMap,
    /// Node parameter holding a JSON string to use as the body
    #[serde(default)]
    pub body_parameter: Option<String>,
    /// Body property the parsed `body_parameter` is placed under
    #[serde(default)]
    pub body_property: Option<String>,
}

impl RequestDefinition {
    /// Request options for this template (without the body parameter applied)
    pub fn to_request_options(&self) -> RequestOptions {
        let mut request = RequestOptions::new(self.method, self.endpoint.clone());
        request.uri = self.uri.clone();
        request.headers = self.headers.clone();
        request.query = self.query.clone();
        request.body = self.body.clone();
        request
    }
}

// ============================================================================
// Pagination Definition
// ============================================================================

/// Pagination configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaginationDefinition {
    /// Cursor pagination over a list endpoint
    Cursor {
        /// Query parameter carrying the cursor
        #[serde(default = "default_cursor_param")]
        cursor_param: String,
        /// Path of the next cursor in a page
        #[serde(default = "default_cursor_path")]
        cursor_path: String,
        /// Path of the item array in a page
        #[serde(default = "default_items_path")]
        items_path: String,
        /// Node parameter holding the return-all flag
        #[serde(default = "default_return_all_param")]
        return_all_param: String,
    },
    /// Analytics report (data API or reporting v4, per `apiVersion`)
    Analytics {
        /// Item array of reporting responses
        #[serde(default = "default_property_name")]
        property_name: String,
    },
}

impl PaginationDefinition {
    /// Cursor paginator for a cursor definition
    pub fn cursor_paginator(&self) -> Option<CursorPaginator> {
        match self {
            Self::Cursor {
                cursor_param,
                cursor_path,
                items_path,
                return_all_param,
            } => Some(
                CursorPaginator::new(cursor_param, cursor_path, items_path)
                    .with_return_all_param(return_all_param),
            ),
            Self::Analytics { .. } => None,
        }
    }
}

fn default_cursor_param() -> String {
    "cursor".to_string()
}

fn default_cursor_path() -> String {
    "nextCursor".to_string()
}

fn default_items_path() -> String {
    "data".to_string()
}

fn default_return_all_param() -> String {
    "returnAll".to_string()
}

fn default_property_name() -> String {
    "reports".to_string()
}
