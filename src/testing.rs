//! Test doubles shared by unit tests

use crate::error::{Error, Result};
use crate::request::{RequestExecutor, RequestOptions};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Executor that replays scripted responses and records every request
#[derive(Debug, Default)]
pub(crate) struct ScriptedExecutor {
    responses: Mutex<VecDeque<Vec<JsonValue>>>,
    requests: Mutex<Vec<RequestOptions>>,
}

impl ScriptedExecutor {
    /// One response per request, each a single page
    pub(crate) fn new(responses: impl IntoIterator<Item = JsonValue>) -> Self {
        Self::with_pages(responses.into_iter().map(|r| vec![r]))
    }

    /// One response per request, each possibly several pages
    pub(crate) fn with_pages(responses: impl IntoIterator<Item = Vec<JsonValue>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<RequestOptions> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl RequestExecutor for ScriptedExecutor {
    async fn execute(&self, request: &RequestOptions) -> Result<JsonValue> {
        let mut pages = self.execute_pages(request).await?;
        Ok(pages.pop().unwrap_or(JsonValue::Null))
    }

    async fn execute_pages(&self, request: &RequestOptions) -> Result<Vec<JsonValue>> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Other("no scripted response left".to_string()))
    }
}
