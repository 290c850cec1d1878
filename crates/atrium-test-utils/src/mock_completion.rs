// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion adapter for deterministic testing.
//!
//! `MockCompletion` implements `CompletionAdapter` with scripted replies,
//! so classifier and handler tests run without a network.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use atrium_core::traits::{CompletionAdapter, PluginAdapter};
use atrium_core::types::{AdapterType, CompletionRequest, CompletionResponse, HealthStatus};
use atrium_core::AtriumError;

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text as the completion content.
    Text(String),
    /// Fail with a provider error carrying this message.
    Fail(String),
}

/// A mock completion service.
///
/// Replies are popped from a FIFO queue. When the queue is empty the
/// fallback reply is used, which defaults to the text "mock response".
/// Every request is recorded for later inspection.
pub struct MockCompletion {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    fallback: MockReply,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompletion {
    /// Create a mock with an empty queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            fallback: MockReply::Text("mock response".to_string()),
            delay: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock pre-loaded with text replies.
    pub fn with_responses<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        let mock = Self::new();
        let queue = responses
            .into_iter()
            .map(|r| MockReply::Text(r.into()))
            .collect();
        Self {
            replies: Arc::new(Mutex::new(queue)),
            ..mock
        }
    }

    /// A mock whose every call fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fallback: MockReply::Fail(message.into()),
            ..Self::new()
        }
    }

    /// A mock that always answers `text`.
    pub fn always(text: impl Into<String>) -> Self {
        Self {
            fallback: MockReply::Text(text.into()),
            ..Self::new()
        }
    }

    /// Sleep this long before replying.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Append a reply to the queue.
    pub async fn push(&self, reply: MockReply) {
        self.replies.lock().await.push_back(reply);
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of `complete` calls received so far.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    async fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl Default for MockCompletion {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockCompletion {
    fn name(&self) -> &str {
        "mock-completion"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, AtriumError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionAdapter for MockCompletion {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, AtriumError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next_reply().await {
            MockReply::Text(content) => Ok(CompletionResponse {
                id: format!("mock-{}", uuid::Uuid::new_v4()),
                content,
                model,
            }),
            MockReply::Fail(message) => Err(AtriumError::provider(message)),
        }
    }
}
