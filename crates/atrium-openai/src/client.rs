// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible Chat Completions endpoints.
//!
//! [`OpenAiClient`] owns authentication headers and the request timeout.
//! Each call makes a single attempt: retry and fallback belong to callers.

use std::time::Duration;

use atrium_core::AtriumError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse};

/// HTTP client for a Chat Completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OpenAiClient {
    /// Creates a client for `{base_url}/chat/completions`.
    ///
    /// # Arguments
    /// * `api_key` - Bearer credential sent with every request
    /// * `base_url` - API root, e.g. `https://api.openai.com/v1`
    /// * `timeout` - Whole-request deadline applied by reqwest
    pub fn new(
        api_key: &SecretString,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AtriumError> {
        let mut headers = HeaderMap::new();
        let mut bearer =
            HeaderValue::from_str(&format!("Bearer {}", api_key.expose_secret())).map_err(
                |e| AtriumError::Config(format!("invalid API key header value: {e}")),
            )?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AtriumError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    /// The full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a completion request and returns the parsed response.
    ///
    /// Transport failures, non-success statuses and unparseable bodies all
    /// surface as [`AtriumError::Provider`]; an elapsed deadline surfaces as
    /// [`AtriumError::Timeout`].
    pub async fn complete_chat(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, AtriumError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!(
                    "OpenAI API error ({}): {}",
                    api_err.error.type_.as_deref().unwrap_or("unknown"),
                    api_err.error.message
                ),
                Err(_) => format!("API returned {status}: {body}"),
            };
            return Err(AtriumError::provider(message));
        }

        serde_json::from_str(&body).map_err(|e| AtriumError::Provider {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> AtriumError {
        if e.is_timeout() {
            return AtriumError::Timeout {
                duration: self.timeout,
            };
        }
        AtriumError::Provider {
            message: format!("HTTP request failed: {e}"),
            source: Some(Box::new(e)),
        }
    }
}
