//! Request executor backed by the HTTP client

use super::client::HttpClient;
use crate::error::{Error, Result};
use crate::node::NodeIdentity;
use crate::request::{RequestExecutor, RequestOptions};
use crate::types::JsonValue;
use async_trait::async_trait;
use tracing::debug;

/// Executes requests for one node over [`HttpClient`]
///
/// Every failure is wrapped in [`Error::NodeApi`] carrying the node identity.
#[derive(Debug)]
pub struct HttpExecutor {
    client: HttpClient,
    node: NodeIdentity,
}

impl HttpExecutor {
    pub fn new(client: HttpClient, node: NodeIdentity) -> Self {
        Self { client, node }
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    pub fn node(&self) -> &NodeIdentity {
        &self.node
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn execute(&self, request: &RequestOptions) -> Result<JsonValue> {
        debug!(
            node = %self.node,
            method = %request.method,
            url = %self.client.resolve_url(request),
            "Executing request"
        );
        self.client
            .request_json(request)
            .await
            .map_err(|e| Error::node_api(self.node.clone(), e))
    }
}
