// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router, the handlers and the gateway.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The closed set of labels a query can be routed to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Answerable from internal policies, SOPs, manuals or training docs.
    DocumentQuery,
    /// Analysis of structured data: trends, statistics, patterns.
    AnalyticsQuery,
    /// Recommendations, next steps, decision support.
    ActionQuery,
    /// Greetings and anything unrelated to enterprise data.
    General,
}

impl Intent {
    /// Every intent, in declaration order.
    pub const ALL: [Intent; 4] = [
        Intent::DocumentQuery,
        Intent::AnalyticsQuery,
        Intent::ActionQuery,
        Intent::General,
    ];

    /// The wire label, e.g. `DOCUMENT_QUERY`.
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Which classification path produced an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// The completion-service classifier.
    Primary,
    /// The keyword heuristic.
    Fallback,
}

/// Outcome of asking the primary classifier.
///
/// Upstream failures are folded into `Unavailable` at the classifier
/// boundary, so callers match on this instead of handling errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierOutcome {
    /// The service answered; unknown labels are already coerced to `General`.
    Classified(Intent),
    /// No usable answer. The string is the reason, for logs.
    Unavailable(String),
}

/// A routed intent plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifierResult {
    pub intent: Intent,
    pub provenance: Provenance,
    /// Why the primary path was skipped or abandoned, when it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl ClassifierResult {
    pub fn primary(intent: Intent) -> Self {
        Self {
            intent,
            provenance: Provenance::Primary,
            fallback_reason: None,
        }
    }

    pub fn fallback(intent: Intent, reason: impl Into<String>) -> Self {
        Self {
            intent,
            provenance: Provenance::Fallback,
            fallback_reason: Some(reason.into()),
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter works in a reduced mode (e.g. no credential).
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => f.write_str("healthy"),
            HealthStatus::Degraded(reason) => write!(f, "degraded: {reason}"),
            HealthStatus::Unhealthy(reason) => write!(f, "unhealthy: {reason}"),
        }
    }
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Completion,
    DocumentIndex,
}

// --- Completion types ---

/// A single-turn request to a text completion service.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model identifier understood by the service.
    pub model: String,
    /// The user-turn text.
    pub prompt: String,
    /// Sampling temperature; 0.0 for maximal determinism.
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: 0.0,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// The service's reply.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    pub id: String,
    pub content: String,
    pub model: String,
}

// --- Document index types ---

/// A retrievable span of an ingested document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChunk {
    /// File name the chunk was cut from.
    pub source: String,
    pub text: String,
}
