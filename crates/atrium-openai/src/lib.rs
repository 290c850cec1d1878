// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible completion adapter for the Atrium assistant.
//!
//! Implements [`CompletionAdapter`] over the Chat Completions API. Any
//! server speaking that protocol works by pointing `openai.base_url` at it.

pub mod client;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use atrium_config::model::OpenAiConfig;
use atrium_core::error::AtriumError;
use atrium_core::traits::{CompletionAdapter, PluginAdapter};
use atrium_core::types::{AdapterType, CompletionRequest, CompletionResponse, HealthStatus};
use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionRequest, ChatMessage};

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Chat Completions provider implementing [`CompletionAdapter`].
pub struct OpenAiProvider {
    client: OpenAiClient,
}

impl OpenAiProvider {
    /// Creates a provider from the `[openai]` section and a resolved key.
    pub fn new(config: &OpenAiConfig, api_key: &SecretString) -> Result<Self, AtriumError> {
        let client = OpenAiClient::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        info!(endpoint = client.endpoint(), "OpenAI provider initialized");
        Ok(Self { client })
    }

    /// Builds the shared completion adapter, or `None` when no credential
    /// is available or the client cannot be built.
    ///
    /// Never fails: a missing credential puts the assistant in its
    /// fallback modes instead of aborting startup.
    pub fn connect(config: &OpenAiConfig) -> Option<Arc<dyn CompletionAdapter>> {
        let Some(api_key) = resolve_api_key(&config.api_key) else {
            warn!("no OpenAI API key configured, LLM features disabled");
            return None;
        };

        match Self::new(config, &api_key) {
            Ok(provider) => Some(Arc::new(provider)),
            Err(e) => {
                warn!(error = %e, "failed to initialize OpenAI provider, LLM features disabled");
                None
            }
        }
    }

    fn to_chat_request(request: CompletionRequest) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: request.model,
            messages: vec![ChatMessage::user(request.prompt)],
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Completion
    }

    async fn health_check(&self) -> Result<HealthStatus, AtriumError> {
        // Never calls upstream: any request would spend tokens.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl CompletionAdapter for OpenAiProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, AtriumError> {
        let chat_request = Self::to_chat_request(request);
        let response = self.client.complete_chat(&chat_request).await?;
        if let Some(usage) = response.usage {
            debug!(
                id = %response.id,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion token usage"
            );
        }

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AtriumError::provider("response contained no choices"))?;
        let content = choice
            .message
            .content
            .ok_or_else(|| AtriumError::provider("response message has no text content"))?;

        Ok(CompletionResponse {
            id: response.id,
            content,
            model: response.model,
        })
    }
}

/// Resolves the API key: `openai.api_key` first, then `OPENAI_API_KEY`.
///
/// Empty values count as absent.
pub fn resolve_api_key(config_key: &Option<String>) -> Option<SecretString> {
    pick_api_key(config_key.as_deref(), std::env::var(API_KEY_ENV).ok())
}

fn pick_api_key(config_key: Option<&str>, env_key: Option<String>) -> Option<SecretString> {
    if let Some(key) = config_key
        && !key.trim().is_empty()
    {
        return Some(SecretString::from(key.trim()));
    }

    env_key
        .filter(|key| !key.trim().is_empty())
        .map(|key| SecretString::from(key.trim()))
}
