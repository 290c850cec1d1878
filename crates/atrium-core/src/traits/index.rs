// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document index trait used by retrieval-augmented answering.

use async_trait::async_trait;

use crate::error::AtriumError;
use crate::traits::adapter::PluginAdapter;
use crate::types::DocumentChunk;

/// Stores document chunks and returns the ones most relevant to a query.
#[async_trait]
pub trait DocumentIndex: PluginAdapter {
    /// Adds chunks to the index.
    async fn add(&self, chunks: Vec<DocumentChunk>) -> Result<(), AtriumError>;

    /// Returns at most `k` chunks, best match first.
    async fn search(&self, query: &str, k: usize) -> Result<Vec<DocumentChunk>, AtriumError>;
}
