// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic intent classification.
//!
//! Keyword rules with zero cost and zero latency. Used directly when no
//! completion service is configured and as the fallback whenever the LLM
//! classifier is unavailable.

use atrium_core::Intent;

/// Requests for recommendations, next steps or decision support.
const ACTION_KEYWORDS: &[&str] = &[
    "recommend",
    "suggest",
    "what should",
    "action",
    "plan",
    "strategy",
];

/// Requests to analyze structured data.
const ANALYTICS_KEYWORDS: &[&str] = &[
    "analyze",
    "trend",
    "statistics",
    "data",
    "chart",
    "graph",
    "metrics",
    "count",
    "average",
];

/// Questions answered from internal policies, SOPs and manuals.
const DOCUMENT_KEYWORDS: &[&str] = &[
    "policy",
    "manual",
    "sop",
    "guideline",
    "rule",
    "leave",
    "probation",
    "document",
    "how to",
];

/// Keyword sets in precedence order. The first set with any hit wins.
const RULES: &[(Intent, &[&str])] = &[
    (Intent::ActionQuery, ACTION_KEYWORDS),
    (Intent::AnalyticsQuery, ANALYTICS_KEYWORDS),
    (Intent::DocumentQuery, DOCUMENT_KEYWORDS),
];

/// Keyword-based intent classifier.
///
/// Matching is plain substring containment on the lower-cased query, so a
/// keyword inside a longer word still counts ("plan" in "explanation").
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a query. Total: every input maps to one of the four intents.
    pub fn classify(&self, query: &str) -> Intent {
        self.explain(query)
            .map(|(intent, _)| intent)
            .unwrap_or(Intent::General)
    }

    /// The winning intent and the keyword that selected it, or `None` when
    /// nothing matched and the query is GENERAL.
    pub fn explain(&self, query: &str) -> Option<(Intent, &'static str)> {
        let lower = query.to_lowercase();
        RULES.iter().find_map(|(intent, keywords)| {
            keywords
                .iter()
                .find(|keyword| lower.contains(*keyword))
                .map(|keyword| (*intent, *keyword))
        })
    }
}
