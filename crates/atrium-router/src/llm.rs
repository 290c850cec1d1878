// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LLM-backed intent classification.
//!
//! Sends a fixed instructional prompt to the completion service and reads
//! back a single label. Every failure is absorbed here and reported as
//! [`ClassifierOutcome::Unavailable`]; callers never see an error.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use atrium_config::model::{OpenAiConfig, RouterConfig};
use atrium_core::traits::CompletionAdapter;
use atrium_core::types::CompletionRequest;
use atrium_core::{AtriumError, ClassifierOutcome, Intent};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const PROMPT_TEMPLATE: &str = r#"You are an Enterprise AI Assistant Router.
Analyze the user's query and classify it into one of the following intents:

1. DOCUMENT_QUERY: Questions that can be answered by looking up internal policies, SOPs, manuals, or training docs.
   Examples: "What is the leave policy?", "How do I claim expenses?", "Show me the safety guidelines."

2. ANALYTICS_QUERY: Requests to analyze structured data, look for trends, statistics, or patterns in data (CSVs/Tables).
   Examples: "Analyze employee attrition trends.", "Which department has the lowest sales?", "Summarize performance metrics."

3. ACTION_QUERY: Requests for recommendations, next steps, or decision support based on analysis.
   Examples: "What action should HR take based on these numbers?", "Recommend a strategy for retention."

4. GENERAL: General conversation, greetings, or questions unrelated to enterprise data.

Return ONLY the intent label (DOCUMENT_QUERY, ANALYTICS_QUERY, ACTION_QUERY, GENERAL).

User Query: {query}
Intent:"#;

/// Classifier backed by a hosted completion service.
///
/// One attempt per call, bounded by `timeout`. No retries.
pub struct LlmClassifier {
    completion: Arc<dyn CompletionAdapter>,
    model: String,
    timeout: Duration,
}

impl LlmClassifier {
    pub fn new(
        completion: Arc<dyn CompletionAdapter>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            completion,
            model: model.into(),
            timeout,
        }
    }

    /// Build from the `[openai]` and `[router]` config sections.
    pub fn from_config(
        completion: Arc<dyn CompletionAdapter>,
        openai: &OpenAiConfig,
        router: &RouterConfig,
    ) -> Self {
        Self::new(
            completion,
            openai.classifier_model.clone(),
            Duration::from_millis(router.classifier_timeout_ms),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Classify `query`. Never fails.
    pub async fn classify(&self, query: &str) -> ClassifierOutcome {
        match self.request_label(query).await {
            Ok(reply) => ClassifierOutcome::Classified(parse_label(&reply)),
            Err(e) => unavailable(e),
        }
    }

    /// Like [`classify`](Self::classify), but gives up as soon as `cancel` fires.
    pub async fn classify_with_cancel(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> ClassifierOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!("LLM classification cancelled, classifier unavailable");
                ClassifierOutcome::Unavailable("cancelled".to_string())
            }
            outcome = self.classify(query) => outcome,
        }
    }

    async fn request_label(&self, query: &str) -> Result<String, AtriumError> {
        let request = CompletionRequest::new(self.model.clone(), build_prompt(query))
            .with_temperature(0.0);

        let response = tokio::time::timeout(self.timeout, self.completion.complete(request))
            .await
            .map_err(|_| AtriumError::Timeout {
                duration: self.timeout,
            })??;

        Ok(response.content)
    }
}

fn unavailable(error: AtriumError) -> ClassifierOutcome {
    warn!(error = %error, "LLM classification failed, classifier unavailable");
    ClassifierOutcome::Unavailable(error.to_string())
}

/// Render the classification prompt for `query`.
pub fn build_prompt(query: &str) -> String {
    PROMPT_TEMPLATE.replace("{query}", query)
}

/// Normalize a model reply into an intent.
///
/// The reply is trimmed and upper-cased. Anything that is not exactly one
/// of the four labels becomes [`Intent::General`].
pub fn parse_label(reply: &str) -> Intent {
    let normalized = reply.trim().to_uppercase();
    match Intent::from_str(&normalized) {
        Ok(intent) => intent,
        Err(_) => {
            debug!(reply = %normalized, "unrecognized intent label, using GENERAL");
            Intent::General
        }
    }
}
