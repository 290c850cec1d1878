// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Handler collaborators and intent dispatch for the Atrium assistant.
//!
//! The [`Dispatcher`] is the request path:
//! - Routes the query through the [`IntentRouter`](atrium_router::IntentRouter)
//! - Hands it to document QA, tabular analysis or the recommendation advisor
//! - Returns the handler text with the intent and its provenance
//!
//! Every handler degrades to a fixed fallback text when no completion
//! service is configured.

pub mod analytics;
pub mod chunker;
pub mod dataset;
pub mod dispatch;
pub mod index;
pub mod rag;
pub mod recommendation;
pub mod shutdown;

use std::path::Path;

pub use analytics::{AnalyticsHandler, NO_DATA_LOADED};
pub use chunker::TextChunker;
pub use dataset::Dataset;
pub use dispatch::{ComponentHealth, DispatchResponse, Dispatcher};
pub use index::InMemoryIndex;
pub use rag::{ingest_dir, RagHandler, RAG_UNAVAILABLE};
pub use recommendation::{RecommendationHandler, RECOMMENDATION_UNAVAILABLE};

/// Final path component of `path`, for status lines and source names.
pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
