// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Retrieval-augmented answering over ingested documents.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use atrium_config::model::{OpenAiConfig, RagConfig};
use atrium_core::traits::{CompletionAdapter, DocumentIndex, DocumentQa};
use atrium_core::types::{CompletionRequest, DocumentChunk};
use atrium_core::AtriumError;
use tracing::{debug, info, warn};

use crate::chunker::TextChunker;
use crate::file_name;

pub const RAG_UNAVAILABLE: &str = "RAG Unavailable (No API Key)";

/// Document QA backed by a [`DocumentIndex`] and, when configured, a
/// completion service.
///
/// Ingestion works without a completion service; answering does not.
pub struct RagHandler {
    index: Arc<dyn DocumentIndex>,
    completion: Option<Arc<dyn CompletionAdapter>>,
    chunker: TextChunker,
    model: String,
    top_k: usize,
}

impl RagHandler {
    pub fn new(
        index: Arc<dyn DocumentIndex>,
        completion: Option<Arc<dyn CompletionAdapter>>,
        rag: &RagConfig,
        openai: &OpenAiConfig,
    ) -> Self {
        Self {
            index,
            completion,
            chunker: TextChunker::new(rag.chunk_size, rag.chunk_overlap),
            model: openai.chat_model.clone(),
            top_k: rag.top_k,
        }
    }

    async fn generate(
        &self,
        completion: &dyn CompletionAdapter,
        query: &str,
    ) -> Result<String, AtriumError> {
        let hits = self.index.search(query, self.top_k).await?;
        let prompt = build_prompt(query, &hits);
        let response = completion
            .complete(CompletionRequest::new(self.model.clone(), prompt))
            .await?;
        Ok(format!("{}\n\nSources: {}", response.content, sources(&hits)))
    }
}

/// Context blocks joined by blank lines, followed by the question.
pub fn build_prompt(query: &str, hits: &[DocumentChunk]) -> String {
    let context = hits
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "Answer the question based only on the following context:\n{context}\n\nQuestion: {query}\n"
    )
}

/// Distinct source names, in retrieval order.
fn sources(hits: &[DocumentChunk]) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for hit in hits {
        if !seen.contains(&hit.source.as_str()) {
            seen.push(&hit.source);
        }
    }
    seen.join(", ")
}

/// Ingest every regular file in `dir`, in file name order.
///
/// Files that fail to ingest are logged and skipped; a missing directory
/// ingests nothing. Returns the number of files ingested.
pub async fn ingest_dir(qa: &dyn DocumentQa, dir: &Path) -> Result<usize, AtriumError> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut ingested = 0;
    for path in &paths {
        match qa.ingest(path).await {
            Ok(status) => {
                debug!(%status, "stored document restored");
                ingested += 1;
            }
            Err(e) => warn!(file = %file_name(path), error = %e, "skipping stored document"),
        }
    }
    Ok(ingested)
}

#[async_trait]
impl DocumentQa for RagHandler {
    async fn ingest(&self, path: &Path) -> Result<String, AtriumError> {
        let name = file_name(path);
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            return Err(AtriumError::UnsupportedFormat(format!(
                "{name}: PDF documents are not supported, upload plain text or markdown"
            )));
        }

        let bytes = tokio::fs::read(path).await?;
        let text = String::from_utf8(bytes).map_err(|_| {
            AtriumError::UnsupportedFormat(format!("{name}: not valid UTF-8 text"))
        })?;

        let chunks: Vec<DocumentChunk> = self
            .chunker
            .split(&text)
            .into_iter()
            .map(|text| DocumentChunk {
                source: name.clone(),
                text,
            })
            .collect();
        let count = chunks.len();
        self.index.add(chunks).await?;

        info!(file = %name, chunks = count, "document ingested");
        Ok(format!("Ingested {count} chunks from {name}"))
    }

    async fn answer(&self, query: &str) -> Result<String, AtriumError> {
        let Some(completion) = self.completion.as_deref() else {
            return Ok(RAG_UNAVAILABLE.to_string());
        };

        match self.generate(completion, query).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                warn!(error = %e, "document answer failed");
                Ok(format!("Error providing answer: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::InMemoryIndex;
    use atrium_test_utils::MockCompletion;

    fn handler(completion: Option<Arc<dyn CompletionAdapter>>) -> (RagHandler, Arc<InMemoryIndex>) {
        let index = Arc::new(InMemoryIndex::new());
        let handler = RagHandler::new(
            index.clone(),
            completion,
            &RagConfig::default(),
            &OpenAiConfig::default(),
        );
        (handler, index)
    }

    fn chunk(source: &str, text: &str) -> DocumentChunk {
        DocumentChunk {
            source: source.into(),
            text: text.into(),
        }
    }

    #[test]
    fn prompt_lists_context_then_question() {
        let prompt = build_prompt(
            "How many days?",
            &[chunk("a.md", "First."), chunk("b.md", "Second.")],
        );
        assert_eq!(
            prompt,
            "Answer the question based only on the following context:\nFirst.\n\nSecond.\n\nQuestion: How many days?\n"
        );
    }

    #[test]
    fn sources_are_deduplicated_in_order() {
        let hits = [chunk("b.md", "x"), chunk("a.md", "y"), chunk("b.md", "z")];
        assert_eq!(sources(&hits), "b.md, a.md");
    }

    #[tokio::test]
    async fn without_completion_answer_is_unavailable() {
        let (handler, _) = handler(None);
        assert_eq!(handler.answer("leave policy").await.unwrap(), RAG_UNAVAILABLE);
    }

    #[tokio::test]
    async fn ingest_then_answer_cites_sources() {
        let mock = Arc::new(MockCompletion::always("Employees get 20 days."));
        let (handler, index) = handler(Some(mock.clone()));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leave.md");
        std::fs::write(&path, "Annual leave policy: 20 days per year.").unwrap();

        let status = handler.ingest(&path).await.unwrap();
        assert_eq!(status, "Ingested 1 chunks from leave.md");
        assert_eq!(index.len().await, 1);

        let answer = handler.answer("What is the leave policy?").await.unwrap();
        assert_eq!(answer, "Employees get 20 days.\n\nSources: leave.md");

        let requests = mock.requests().await;
        assert!(requests[0].prompt.contains("Annual leave policy: 20 days per year."));
        assert_eq!(requests[0].model, "gpt-3.5-turbo");
        assert_eq!(requests[0].temperature, 0.0);
    }

    #[tokio::test]
    async fn completion_failure_becomes_error_text() {
        let (handler, _) = handler(Some(Arc::new(MockCompletion::failing("rate limited"))));
        let answer = handler.answer("leave policy").await.unwrap();
        assert!(answer.starts_with("Error providing answer: "), "got: {answer}");
        assert!(answer.contains("rate limited"));
    }

    #[tokio::test]
    async fn pdf_is_rejected() {
        let (handler, _) = handler(None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manual.PDF");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let err = handler.ingest(&path).await.unwrap_err();
        assert!(matches!(err, AtriumError::UnsupportedFormat(_)), "got: {err:?}");
    }

    #[tokio::test]
    async fn ingest_dir_restores_readable_files() {
        let (handler, index) = handler(None);
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("leave.md"), "Annual leave: 20 days.").unwrap();
        std::fs::write(dir.path().join("travel.txt"), "Book travel two weeks ahead.").unwrap();
        std::fs::write(dir.path().join("scan.pdf"), b"%PDF-1.7").unwrap();
        std::fs::create_dir(dir.path().join("archive")).unwrap();

        let count = ingest_dir(&handler, dir.path()).await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(index.len().await, 2);
        let hits = index.search("annual leave", 1).await.unwrap();
        assert_eq!(hits[0].source, "leave.md");
    }

    #[tokio::test]
    async fn ingest_dir_of_missing_directory_is_empty() {
        let (handler, index) = handler(None);
        let dir = tempfile::tempdir().unwrap();
        let count = ingest_dir(&handler, &dir.path().join("never-created"))
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert!(index.is_empty().await);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let (handler, _) = handler(None);
        let err = handler
            .ingest(Path::new("/nonexistent/atrium/doc.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, AtriumError::Io { .. }), "got: {err:?}");
    }
}
