// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Atrium assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Atrium configuration.
///
/// Every section is optional and falls back to defaults. A missing
/// completion-service credential is a valid configuration: the router
/// and the handlers run in their documented fallback modes.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AtriumConfig {
    /// Assistant identity and log verbosity.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Completion service (OpenAI-compatible) settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Intent router settings.
    #[serde(default)]
    pub router: RouterConfig,

    /// Document chunking and retrieval settings.
    #[serde(default)]
    pub rag: RagConfig,

    /// Upload directories.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Log file settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Assistant identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name, reported by the health endpoint.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "Enterprise AI Assistant".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Completion service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to the `OPENAI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the chat completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used by the intent classifier.
    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    /// Model used for document answers and recommendations.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for dataset analysis.
    #[serde(default = "default_analytics_model")]
    pub analytics_model: String,

    /// HTTP request timeout in seconds, applied to every call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            classifier_model: default_classifier_model(),
            chat_model: default_chat_model(),
            analytics_model: default_analytics_model(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_classifier_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_analytics_model() -> String {
    "gpt-4".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Intent router configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Use the completion service for classification when a credential is
    /// present. When false, every query goes straight to the keyword heuristic.
    #[serde(default = "default_llm_enabled")]
    pub llm_enabled: bool,

    /// Upper bound on one classification call, in milliseconds. On expiry
    /// the query is classified by the keyword heuristic.
    #[serde(default = "default_classifier_timeout_ms")]
    pub classifier_timeout_ms: u64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            llm_enabled: default_llm_enabled(),
            classifier_timeout_ms: default_classifier_timeout_ms(),
        }
    }
}

fn default_llm_enabled() -> bool {
    true
}

fn default_classifier_timeout_ms() -> u64 {
    10_000
}

/// Document chunking and retrieval configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RagConfig {
    /// Target chunk length in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Characters shared between neighbouring chunks. Must be below `chunk_size`.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,

    /// Number of chunks placed in the answer prompt.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
            top_k: default_top_k(),
        }
    }
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

fn default_top_k() -> usize {
    3
}

/// Upload directory configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Where uploaded documents are written before ingestion.
    #[serde(default = "default_documents_dir")]
    pub documents_dir: String,

    /// Where uploaded datasets are written before loading.
    #[serde(default = "default_datasets_dir")]
    pub datasets_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            documents_dir: default_documents_dir(),
            datasets_dir: default_datasets_dir(),
        }
    }
}

fn default_documents_dir() -> String {
    "data/documents".to_string()
}

fn default_datasets_dir() -> String {
    "data/structured".to_string()
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bearer token required on `/api/*` routes. `None` leaves them open.
    #[serde(default)]
    pub bearer_token: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            bearer_token: None,
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

/// Log file configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Directory for daily `app_<date>.log` files. `None` logs to the console only.
    #[serde(default)]
    pub directory: Option<String>,
}
