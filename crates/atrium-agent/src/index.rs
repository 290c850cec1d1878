// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process document index ranked by lexical term overlap.
//!
//! No embeddings and no vector similarity: a chunk scores one point per
//! distinct query term it contains. Ties keep insertion order.

use std::collections::HashSet;

use async_trait::async_trait;
use atrium_core::traits::{DocumentIndex, PluginAdapter};
use atrium_core::types::{AdapterType, DocumentChunk, HealthStatus};
use atrium_core::AtriumError;
use tokio::sync::RwLock;

/// Terms too common to say anything about relevance.
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "can", "do", "does", "for", "how", "i", "in", "is", "it", "me",
    "my", "of", "on", "or", "the", "to", "we", "what", "when", "where", "which", "who", "with",
];

struct IndexedChunk {
    chunk: DocumentChunk,
    terms: HashSet<String>,
}

#[derive(Default)]
pub struct InMemoryIndex {
    chunks: RwLock<Vec<IndexedChunk>>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.chunks.read().await.is_empty()
    }
}

/// Lower-cased alphanumeric terms of `text`, minus stop words.
pub fn terms(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .filter(|t| !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

#[async_trait]
impl PluginAdapter for InMemoryIndex {
    fn name(&self) -> &str {
        "in-memory-index"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::DocumentIndex
    }

    async fn health_check(&self) -> Result<HealthStatus, AtriumError> {
        if self.is_empty().await {
            Ok(HealthStatus::Degraded("no documents ingested".into()))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }
}

#[async_trait]
impl DocumentIndex for InMemoryIndex {
    async fn add(&self, chunks: Vec<DocumentChunk>) -> Result<(), AtriumError> {
        let indexed: Vec<IndexedChunk> = chunks
            .into_iter()
            .map(|chunk| IndexedChunk {
                terms: terms(&chunk.text),
                chunk,
            })
            .collect();
        self.chunks.write().await.extend(indexed);
        Ok(())
    }

    async fn search(&self, query: &str, k: usize) -> Result<Vec<DocumentChunk>, AtriumError> {
        let query_terms = terms(query);
        if query_terms.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let chunks = self.chunks.read().await;
        let mut scored: Vec<(usize, usize)> = chunks
            .iter()
            .enumerate()
            .map(|(i, c)| (c.terms.intersection(&query_terms).count(), i))
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable sort: equal scores stay in insertion order.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(_, i)| chunks[i].chunk.clone())
            .collect())
    }
}
