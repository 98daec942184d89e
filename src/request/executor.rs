//! Request execution capability

use super::types::RequestOptions;
use crate::error::Result;
use crate::types::JsonValue;
use async_trait::async_trait;
use std::sync::Arc;

/// Executes requests and returns their parsed JSON bodies
///
/// Implementations own transport concerns (base URL, auth headers, retries,
/// timeouts). Failures are expected to come back already wrapped with the
/// identity of the node that issued the request.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    /// Execute one request
    async fn execute(&self, request: &RequestOptions) -> Result<JsonValue>;

    /// Execute one request that may yield several pages
    ///
    /// The default treats the single response body as the only page.
    async fn execute_pages(&self, request: &RequestOptions) -> Result<Vec<JsonValue>> {
        Ok(vec![self.execute(request).await?])
    }
}

#[async_trait]
impl<T: RequestExecutor + ?Sized> RequestExecutor for Arc<T> {
    async fn execute(&self, request: &RequestOptions) -> Result<JsonValue> {
        (**self).execute(request).await
    }

    async fn execute_pages(&self, request: &RequestOptions) -> Result<Vec<JsonValue>> {
        (**self).execute_pages(request).await
    }
}
