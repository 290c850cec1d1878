// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent routing with LLM-first classification and heuristic fallback.
//!
//! Per call: try the primary classifier if one is live, otherwise (or when it
//! reports unavailable) take the heuristic result. Routing never fails.

use std::sync::Arc;

use atrium_config::AtriumConfig;
use atrium_core::traits::CompletionAdapter;
use atrium_core::{ClassifierOutcome, ClassifierResult, Intent};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::classifier::HeuristicClassifier;
use crate::llm::LlmClassifier;

/// The primary classification path, chosen once at construction.
pub enum PrimaryClassifier {
    /// A completion service is configured; ask it first.
    Live(LlmClassifier),
    /// No completion service; every call goes straight to the heuristic.
    Disabled,
}

impl PrimaryClassifier {
    pub fn is_live(&self) -> bool {
        matches!(self, PrimaryClassifier::Live(_))
    }
}

/// Composes the LLM and heuristic classifiers into one total decision.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct IntentRouter {
    primary: PrimaryClassifier,
    heuristic: HeuristicClassifier,
}

impl IntentRouter {
    pub fn new(primary: PrimaryClassifier) -> Self {
        Self {
            primary,
            heuristic: HeuristicClassifier::new(),
        }
    }

    /// A router that only ever uses keyword rules.
    pub fn heuristic_only() -> Self {
        Self::new(PrimaryClassifier::Disabled)
    }

    /// Build a router from configuration and an optional completion service.
    ///
    /// The LLM path is live only when `completion` is present and
    /// `router.llm_enabled` is set.
    pub fn from_config(
        config: &AtriumConfig,
        completion: Option<Arc<dyn CompletionAdapter>>,
    ) -> Self {
        let primary = match completion {
            Some(completion) if config.router.llm_enabled => {
                let llm = LlmClassifier::from_config(completion, &config.openai, &config.router);
                info!(
                    model = llm.model(),
                    timeout_ms = llm.timeout().as_millis() as u64,
                    "intent router using LLM classification"
                );
                PrimaryClassifier::Live(llm)
            }
            Some(_) => {
                info!("LLM classification disabled by config, using keyword rules");
                PrimaryClassifier::Disabled
            }
            None => {
                info!("no completion service configured, using keyword rules");
                PrimaryClassifier::Disabled
            }
        };
        Self::new(primary)
    }

    pub fn primary(&self) -> &PrimaryClassifier {
        &self.primary
    }

    /// Route a query to an intent.
    pub async fn route(&self, query: &str) -> Intent {
        self.route_detailed(query).await.intent
    }

    /// Route a query and report which path produced the intent.
    pub async fn route_detailed(&self, query: &str) -> ClassifierResult {
        let outcome = match &self.primary {
            PrimaryClassifier::Live(llm) => Some(llm.classify(query).await),
            PrimaryClassifier::Disabled => None,
        };
        self.settle(query, outcome)
    }

    /// Route a query, abandoning the LLM call if `cancel` fires first.
    pub async fn route_with_cancel(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> ClassifierResult {
        let outcome = match &self.primary {
            PrimaryClassifier::Live(llm) => Some(llm.classify_with_cancel(query, cancel).await),
            PrimaryClassifier::Disabled => None,
        };
        self.settle(query, outcome)
    }

    fn settle(&self, query: &str, outcome: Option<ClassifierOutcome>) -> ClassifierResult {
        let result = match outcome {
            Some(ClassifierOutcome::Classified(intent)) => ClassifierResult::primary(intent),
            Some(ClassifierOutcome::Unavailable(reason)) => {
                ClassifierResult::fallback(self.heuristic_intent(query), reason)
            }
            None => ClassifierResult::fallback(self.heuristic_intent(query), "llm disabled"),
        };

        info!(
            intent = %result.intent,
            provenance = %result.provenance,
            "query routed"
        );
        result
    }

    fn heuristic_intent(&self, query: &str) -> Intent {
        match self.heuristic.explain(query) {
            Some((intent, keyword)) => {
                debug!(intent = %intent, keyword, "keyword rule matched");
                intent
            }
            None => Intent::General,
        }
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::heuristic_only()
    }
}

impl std::fmt::Debug for IntentRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentRouter")
            .field("llm", &self.primary.is_live())
            .finish()
    }
}
