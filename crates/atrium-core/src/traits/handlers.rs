// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contracts of the three handler collaborators behind the dispatch layer.

use std::path::Path;

use async_trait::async_trait;

use crate::error::AtriumError;

/// Answers questions from ingested documents.
#[async_trait]
pub trait DocumentQa: Send + Sync {
    /// Splits the file into chunks and indexes them. Returns a status line.
    async fn ingest(&self, path: &Path) -> Result<String, AtriumError>;

    /// Returns the answer text followed by its source list.
    async fn answer(&self, query: &str) -> Result<String, AtriumError>;
}

/// Answers questions about the currently loaded dataset.
#[async_trait]
pub trait TabularAnalyst: Send + Sync {
    /// Replaces the active dataset. Load failures are reported in the
    /// returned text rather than as an error.
    async fn load(&self, path: &Path) -> String;

    /// Analyzes the active dataset, or returns the "no data loaded" text.
    async fn analyze(&self, query: &str) -> Result<String, AtriumError>;
}

/// Produces strategic recommendations.
#[async_trait]
pub trait Recommender: Send + Sync {
    async fn recommend(&self, query: &str) -> Result<String, AtriumError>;
}
