// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent classification and routing for the Atrium assistant.
//!
//! This crate provides:
//! - [`HeuristicClassifier`]: keyword rules with fixed precedence (zero-cost, zero-latency)
//! - [`LlmClassifier`]: one-shot classification through a completion service
//! - [`IntentRouter`]: LLM first, heuristic fallback; always returns an intent
//!
//! Whether the LLM path exists is decided once, when the router is built.

pub mod classifier;
pub mod llm;
pub mod router;

pub use classifier::HeuristicClassifier;
pub use llm::{build_prompt, parse_label, LlmClassifier};
pub use router::{IntentRouter, PrimaryClassifier};
