//! Cursor pagination
//!
//! Issues a request, reads `nextCursor` from the last returned page and feeds
//! it back as the `cursor` query parameter until the server stops issuing
//! cursors or the node only wants the first page.

use super::types::{Continuation, NextPage, PaginationState};
use crate::error::Result;
use crate::node::{ExecutionItem, ParameterResolver};
use crate::request::{RequestExecutor, RequestOptions};
use crate::types::{lookup_path, lookup_token, JsonValue};
use tracing::{debug, info};

/// Cursor-based paginator for list endpoints
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Query parameter carrying the cursor
    pub cursor_param: String,
    /// Path of the next cursor in a page
    pub cursor_path: String,
    /// Path of the item array in a page
    pub items_path: String,
    /// Node parameter holding the return-all flag
    pub return_all_param: String,
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self {
            cursor_param: "cursor".to_string(),
            cursor_path: "nextCursor".to_string(),
            items_path: "data".to_string(),
            return_all_param: "returnAll".to_string(),
        }
    }
}

impl CursorPaginator {
    /// Create a cursor paginator with custom field names
    pub fn new(
        cursor_param: impl Into<String>,
        cursor_path: impl Into<String>,
        items_path: impl Into<String>,
    ) -> Self {
        Self {
            cursor_param: cursor_param.into(),
            cursor_path: cursor_path.into(),
            items_path: items_path.into(),
            ..Default::default()
        }
    }

    /// Read the return-all flag from a different node parameter
    #[must_use]
    pub fn with_return_all_param(mut self, name: impl Into<String>) -> Self {
        self.return_all_param = name.into();
        self
    }

    /// Derive the request for one page from the template
    ///
    /// Without a cursor the parameter is removed, so the first request never
    /// carries a stale value from the template.
    pub fn request_for(&self, template: &RequestOptions, cursor: Option<&str>) -> RequestOptions {
        let request = template.clone();
        match cursor {
            Some(c) => request.with_query(self.cursor_param.clone(), c),
            None => request.without_query(&self.cursor_param),
        }
    }

    /// Continuation from the last page of one response
    pub fn next_page(&self, pages: &[JsonValue]) -> NextPage {
        NextPage::cursor(
            pages
                .last()
                .and_then(|page| lookup_token(page, &self.cursor_path)),
        )
    }

    /// Items of one page, each wrapped as an execution item
    ///
    /// A page without an item array contributes nothing.
    pub fn extract_items(&self, page: &JsonValue) -> Vec<ExecutionItem> {
        match lookup_path(page, &self.items_path) {
            Some(JsonValue::Array(items)) => items.iter().cloned().map(ExecutionItem::new).collect(),
            Some(other) if !other.is_null() => {
                debug!(path = %self.items_path, "Item field is not an array, skipping page");
                Vec::new()
            }
            _ => {
                debug!(path = %self.items_path, "Page has no item field");
                Vec::new()
            }
        }
    }

    /// Fetch every page (or only the first) and collect the items in order
    pub async fn fetch_all(
        &self,
        executor: &dyn RequestExecutor,
        params: &dyn ParameterResolver,
        template: &RequestOptions,
    ) -> Result<Vec<ExecutionItem>> {
        let return_all = params.bool_parameter(&self.return_all_param, false)?;
        let mut state = PaginationState::new();
        let mut items = Vec::new();

        loop {
            let cursor = match &state.continuation {
                Some(Continuation::Cursor(c)) => Some(c.as_str()),
                _ => None,
            };
            let request = self.request_for(template, cursor);
            let pages = executor.execute_pages(&request).await?;

            let before = items.len();
            for page in &pages {
                items.extend(self.extract_items(page));
            }
            state.record_page(items.len() - before);

            let next = self.next_page(&pages);
            debug!(
                request = state.requests,
                pages = pages.len(),
                items = items.len() - before,
                has_more = next.is_continue(),
                "Fetched cursor page"
            );

            if !return_all {
                state.mark_done();
                break;
            }
            state.advance(next);
            if state.done {
                break;
            }
        }

        info!(
            node = %params.node(),
            requests = state.requests,
            items = state.total_fetched,
            "Cursor pagination complete"
        );
        Ok(items)
    }
}
