//! Page strategies for the two analytics APIs
//!
//! The API version is resolved once per call and mapped onto a
//! [`PageStrategy`]; each variant has its own handler.

use super::types::ApiVersion;
use crate::error::{Error, Result};
use crate::node::ParameterResolver;
use crate::pagination::{Continuation, NextPage, PaginationState};
use crate::request::{RequestExecutor, RequestOptions};
use crate::types::{lookup_token, JsonObject, JsonValue};
use tracing::{debug, info, warn};

/// Row limit requested per data API page
pub const DATA_API_PAGE_LIMIT: u64 = 100_000;

/// How pages of an analytics query are walked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStrategy {
    /// Data API: `offset`/`limit` query parameters, stop once `rowCount` rows
    /// have been accumulated
    RowOffset { limit: u64 },
    /// Reporting v4: server-issued `nextPageToken` fed back as `pageToken`
    PageToken { property_name: String },
}

impl PageStrategy {
    /// Strategy for an API version; `property_name` names the item array of
    /// reporting responses (e.g. `reports`)
    pub fn for_version(version: ApiVersion, property_name: impl Into<String>) -> Self {
        match version {
            ApiVersion::DataApi => Self::RowOffset {
                limit: DATA_API_PAGE_LIMIT,
            },
            ApiVersion::ReportingV4 => Self::PageToken {
                property_name: property_name.into(),
            },
        }
    }

    /// Fetch every page of the query described by `template`
    ///
    /// Row offset yields a single merged response; page token yields the
    /// concatenated item arrays of all pages.
    pub async fn fetch_all(
        &self,
        executor: &dyn RequestExecutor,
        template: &RequestOptions,
    ) -> Result<Vec<JsonValue>> {
        match self {
            Self::RowOffset { limit } => fetch_row_offset(executor, template, *limit).await,
            Self::PageToken { property_name } => {
                fetch_page_tokens(executor, template, property_name).await
            }
        }
    }
}

/// Fetch all pages of an analytics query for the node's `apiVersion`
pub async fn request_all_items(
    executor: &dyn RequestExecutor,
    params: &dyn ParameterResolver,
    property_name: &str,
    template: &RequestOptions,
) -> Result<Vec<JsonValue>> {
    let version = ApiVersion::from_parameter(&params.str_parameter("apiVersion", "v4")?);
    debug!(node = %params.node(), %version, "Fetching all analytics pages");
    PageStrategy::for_version(version, property_name)
        .fetch_all(executor, template)
        .await
}

// ============================================================================
// Row Offset
// ============================================================================

async fn fetch_row_offset(
    executor: &dyn RequestExecutor,
    template: &RequestOptions,
    limit: u64,
) -> Result<Vec<JsonValue>> {
    let mut state = PaginationState::new();
    let mut rows: Vec<JsonValue> = Vec::new();
    let mut offset = 0u64;

    loop {
        let request = template
            .clone()
            .with_query("limit", limit)
            .with_query("offset", offset);
        let mut response = executor.execute(&request).await?;
        let page = response
            .as_object_mut()
            .ok_or_else(|| Error::decode("data API response is not an object"))?;

        let page_rows = take_rows(page);
        let added = page_rows.len();
        rows.extend(page_rows);
        state.record_page(added);
        offset = rows.len() as u64;

        let row_count = page.get("rowCount").and_then(as_count);
        let more = row_count.is_some_and(|total| total > offset);
        debug!(
            request = state.requests,
            rows = added,
            total = offset,
            row_count,
            "Fetched data API page"
        );

        if more && added == 0 {
            warn!(
                row_count,
                fetched = offset,
                "Data API page returned no rows before rowCount was reached, stopping"
            );
        }
        if !more || added == 0 {
            state.mark_done();
            page.insert("rows".to_string(), JsonValue::Array(rows));
            info!(
                requests = state.requests,
                rows = state.total_fetched,
                "Data API pagination complete"
            );
            return Ok(vec![response]);
        }

        state.advance(NextPage::Continue(Continuation::Offset(offset)));
    }
}

/// Remove and return the row array of a page; anything else counts as no rows
fn take_rows(page: &mut JsonObject) -> Vec<JsonValue> {
    match page.remove("rows") {
        Some(JsonValue::Array(rows)) => rows,
        Some(JsonValue::Null) | None => {
            debug!("Data API page has no rows");
            Vec::new()
        }
        Some(other) => {
            debug!(kind = %json_kind(&other), "Data API rows field is not an array");
            Vec::new()
        }
    }
}

fn as_count(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

// ============================================================================
// Page Token
// ============================================================================

async fn fetch_page_tokens(
    executor: &dyn RequestExecutor,
    template: &RequestOptions,
    property_name: &str,
) -> Result<Vec<JsonValue>> {
    let mut state = PaginationState::new();
    let mut items = Vec::new();
    let mut request = template.clone();

    loop {
        let response = executor.execute(&request).await?;

        let page_items = match response.get(property_name) {
            Some(JsonValue::Array(values)) => values.clone(),
            _ => {
                debug!(property = property_name, "Response has no item array");
                Vec::new()
            }
        };
        state.record_page(page_items.len());
        items.extend(page_items);

        let next = next_page_token(&response, property_name);
        let repeated = matches!(
            (&next, &state.continuation),
            (NextPage::Continue(next_token), Some(sent)) if next_token == sent
        );
        if repeated {
            warn!(request = state.requests, "Server repeated the page token, stopping");
            state.mark_done();
            break;
        }

        debug!(
            request = state.requests,
            items = items.len(),
            has_more = next.is_continue(),
            "Fetched reporting page"
        );

        state.advance(next);
        match &state.continuation {
            Some(Continuation::PageToken(token)) => request = with_page_token(template, token),
            _ => break,
        }
    }

    info!(
        requests = state.requests,
        items = items.len(),
        "Reporting pagination complete"
    );
    Ok(items)
}

/// Next page token of a reporting response
///
/// Read from the first report (`<property>[0].nextPageToken`) and, failing
/// that, from a top-level `nextPageToken`.
pub fn next_page_token(response: &JsonValue, property_name: &str) -> NextPage {
    let nested = response
        .get(property_name)
        .and_then(|items| items.get(0))
        .and_then(|first| lookup_token(first, "nextPageToken"));
    NextPage::page_token(nested.or_else(|| lookup_token(response, "nextPageToken")))
}

/// Derive the request for the page behind `token`
///
/// Batch bodies (`reportRequests` array) carry the token in their first
/// request; any other body carries it at the top level.
pub fn with_page_token(template: &RequestOptions, token: &str) -> RequestOptions {
    let mut body = match template.body.clone() {
        Some(JsonValue::Object(map)) => map,
        _ => JsonObject::new(),
    };

    let batch = body
        .get_mut("reportRequests")
        .and_then(JsonValue::as_array_mut)
        .and_then(|requests| requests.first_mut())
        .and_then(JsonValue::as_object_mut);
    match batch {
        Some(first) => {
            first.insert("pageToken".to_string(), JsonValue::from(token));
        }
        None => {
            body.insert("pageToken".to_string(), JsonValue::from(token));
        }
    }

    template.clone().with_body(JsonValue::Object(body))
}
