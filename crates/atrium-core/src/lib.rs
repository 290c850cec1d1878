// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Atrium assistant.
//!
//! This crate provides the intent types, the error type and the trait
//! definitions shared across the Atrium workspace. The router, the
//! completion adapters and the handler collaborators all meet here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AtriumError;
pub use types::{
    AdapterType, ClassifierOutcome, ClassifierResult, CompletionRequest, CompletionResponse,
    DocumentChunk, HealthStatus, Intent, Provenance,
};

pub use traits::{
    CompletionAdapter, DocumentIndex, DocumentQa, PluginAdapter, Recommender, TabularAnalyst,
};
