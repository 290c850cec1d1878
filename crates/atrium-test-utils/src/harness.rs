// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles the full request path (router, handlers,
//! dispatcher) around a [`MockCompletion`], with storage directories in a
//! temp dir. `ask()` drives one query through it.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use atrium_agent::{DispatchResponse, Dispatcher};
use atrium_config::AtriumConfig;
use atrium_core::traits::CompletionAdapter;
use atrium_core::AtriumError;
use tempfile::TempDir;

use crate::mock_completion::MockCompletion;

enum CompletionSetup {
    None,
    Responses(Vec<String>),
    Always(String),
    Failing(String),
}

/// Builder for test environments.
pub struct TestHarnessBuilder {
    completion: CompletionSetup,
    delay: Option<Duration>,
    classifier_timeout: Option<Duration>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            completion: CompletionSetup::None,
            delay: None,
            classifier_timeout: None,
        }
    }

    /// Enable the completion service with queued replies.
    ///
    /// Remember that the classifier consumes one reply per routed query.
    pub fn with_mock_responses<S: Into<String>>(mut self, responses: Vec<S>) -> Self {
        self.completion =
            CompletionSetup::Responses(responses.into_iter().map(Into::into).collect());
        self
    }

    /// Enable the completion service, answering `text` to everything.
    pub fn with_constant_response(mut self, text: impl Into<String>) -> Self {
        self.completion = CompletionSetup::Always(text.into());
        self
    }

    /// Enable a completion service that fails every call.
    pub fn with_failing_completion(mut self, message: impl Into<String>) -> Self {
        self.completion = CompletionSetup::Failing(message.into());
        self
    }

    /// Delay every completion reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Override `router.classifier_timeout_ms`.
    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<TestHarness, AtriumError> {
        let temp_dir = TempDir::new()?;
        let documents_dir = temp_dir.path().join("documents");
        let datasets_dir = temp_dir.path().join("structured");
        std::fs::create_dir_all(&documents_dir)?;
        std::fs::create_dir_all(&datasets_dir)?;

        let mut config = AtriumConfig::default();
        config.storage.documents_dir = documents_dir.display().to_string();
        config.storage.datasets_dir = datasets_dir.display().to_string();
        if let Some(timeout) = self.classifier_timeout {
            config.router.classifier_timeout_ms = timeout.as_millis() as u64;
        }

        let mock = match self.completion {
            CompletionSetup::None => None,
            CompletionSetup::Responses(replies) => Some(MockCompletion::with_responses(replies)),
            CompletionSetup::Always(text) => Some(MockCompletion::always(text)),
            CompletionSetup::Failing(message) => Some(MockCompletion::failing(message)),
        };
        let mock = mock.map(|m| match self.delay {
            Some(delay) => Arc::new(m.with_delay(delay)),
            None => Arc::new(m),
        });

        let completion = mock
            .clone()
            .map(|m| m as Arc<dyn CompletionAdapter>);
        let dispatcher = Arc::new(Dispatcher::from_config(&config, completion));

        Ok(TestHarness {
            dispatcher,
            completion: mock,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A fully wired assistant for tests.
pub struct TestHarness {
    pub dispatcher: Arc<Dispatcher>,
    /// The mock behind every LLM call, when enabled.
    pub completion: Option<Arc<MockCompletion>>,
    pub config: AtriumConfig,
    _temp_dir: TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Route and dispatch one query.
    pub async fn ask(&self, query: &str) -> Result<DispatchResponse, AtriumError> {
        self.dispatcher.handle(query).await
    }

    pub fn documents_dir(&self) -> &Path {
        Path::new(&self.config.storage.documents_dir)
    }

    pub fn datasets_dir(&self) -> &Path {
        Path::new(&self.config.storage.datasets_dir)
    }

    /// Write `content` into the documents directory and return its path.
    pub fn write_document(&self, name: &str, content: &str) -> Result<PathBuf, AtriumError> {
        let path = self.documents_dir().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Write `content` into the datasets directory and return its path.
    pub fn write_dataset(&self, name: &str, content: &str) -> Result<PathBuf, AtriumError> {
        let path = self.datasets_dir().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }
}
