// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Question answering over the most recently uploaded dataset.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use atrium_config::model::OpenAiConfig;
use atrium_core::traits::{CompletionAdapter, TabularAnalyst};
use atrium_core::types::CompletionRequest;
use atrium_core::AtriumError;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::dataset::Dataset;
use crate::file_name;

pub const NO_DATA_LOADED: &str = "No data loaded. Please upload a dataset first.";

/// Rows included verbatim in the analysis prompt.
const SAMPLE_ROWS: usize = 20;

/// Holds one active dataset and answers questions about it.
pub struct AnalyticsHandler {
    dataset: RwLock<Option<Arc<Dataset>>>,
    completion: Option<Arc<dyn CompletionAdapter>>,
    model: String,
}

impl AnalyticsHandler {
    pub fn new(completion: Option<Arc<dyn CompletionAdapter>>, openai: &OpenAiConfig) -> Self {
        Self {
            dataset: RwLock::new(None),
            completion,
            model: openai.analytics_model.clone(),
        }
    }

    /// The active dataset, if one is loaded.
    pub async fn dataset(&self) -> Option<Arc<Dataset>> {
        self.dataset.read().await.clone()
    }

    async fn read_dataset(path: &Path) -> Result<Dataset, AtriumError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let loader: fn(&Path) -> Result<Dataset, AtriumError> = match ext.as_deref() {
            Some("csv") => Dataset::from_csv_path,
            Some("xlsx" | "xls") => Dataset::from_xlsx_path,
            _ => {
                return Err(AtriumError::UnsupportedFormat(format!(
                    "{}: only CSV and Excel datasets are supported",
                    file_name(path)
                )));
            }
        };

        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || loader(&path))
            .await
            .map_err(|e| AtriumError::Internal(format!("dataset loader task failed: {e}")))?
    }

    async fn ask(
        &self,
        completion: &dyn CompletionAdapter,
        dataset: &Dataset,
        query: &str,
    ) -> Result<String, AtriumError> {
        let prompt = build_prompt(dataset, query)?;
        let response = completion
            .complete(CompletionRequest::new(self.model.clone(), prompt))
            .await?;
        Ok(response.content)
    }
}

/// Schema, summary statistics and a row sample, followed by the question.
pub fn build_prompt(dataset: &Dataset, query: &str) -> Result<String, AtriumError> {
    let shown = dataset.row_count().min(SAMPLE_ROWS);
    Ok(format!(
        "You are a data analyst working with a table loaded from {source}.\n\
         Columns: {columns}\n\
         Rows: {rows}\n\n\
         Summary statistics:\n{describe}\n\n\
         First {shown} rows (CSV):\n{sample}\n\
         Answer the question using only this data. If the data cannot answer it, say so.\n\n\
         Question: {query}\n\
         Answer:",
        source = dataset.source,
        columns = dataset.column_list(),
        rows = dataset.row_count(),
        describe = dataset.describe(),
        sample = dataset.sample_csv(SAMPLE_ROWS)?,
    ))
}

#[async_trait]
impl TabularAnalyst for AnalyticsHandler {
    async fn load(&self, path: &Path) -> String {
        match Self::read_dataset(path).await {
            Ok(dataset) => {
                let summary = format!(
                    "Loaded data with {} rows and columns: {}",
                    dataset.row_count(),
                    dataset.column_list()
                );
                info!(file = %dataset.source, rows = dataset.row_count(), "dataset loaded");
                *self.dataset.write().await = Some(Arc::new(dataset));
                summary
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "dataset load failed");
                format!("Error loading data: {e}")
            }
        }
    }

    async fn analyze(&self, query: &str) -> Result<String, AtriumError> {
        let Some(dataset) = self.dataset().await else {
            return Ok(NO_DATA_LOADED.to_string());
        };

        let Some(completion) = self.completion.as_deref() else {
            return Ok(format!(
                "LLM not available. Here are the basic statistics:\n{}",
                dataset.describe()
            ));
        };

        match self.ask(completion, &dataset, query).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                warn!(error = %e, "analysis failed");
                Ok(format!("Analysis failed: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atrium_test_utils::MockCompletion;

    const SALES: &str = "region,revenue\nNorth,100\nSouth,50\nEast,75\n";

    fn write_csv(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn analyze_without_dataset_returns_sentinel() {
        let handler = AnalyticsHandler::new(None, &OpenAiConfig::default());
        assert_eq!(handler.analyze("trend?").await.unwrap(), NO_DATA_LOADED);
    }

    #[tokio::test]
    async fn load_reports_rows_and_columns() {
        let dir = tempfile::tempdir().unwrap();
        let handler = AnalyticsHandler::new(None, &OpenAiConfig::default());

        let result = handler.load(&write_csv(&dir, "sales.csv", SALES)).await;
        assert_eq!(
            result,
            "Loaded data with 3 rows and columns: ['region', 'revenue']"
        );
        assert_eq!(handler.dataset().await.unwrap().source, "sales.csv");
    }

    #[tokio::test]
    async fn load_failure_is_reported_in_text_and_keeps_previous() {
        let dir = tempfile::tempdir().unwrap();
        let handler = AnalyticsHandler::new(None, &OpenAiConfig::default());
        handler.load(&write_csv(&dir, "sales.csv", SALES)).await;

        let result = handler.load(&write_csv(&dir, "notes.json", "{}")).await;
        assert!(result.starts_with("Error loading data: "), "got: {result}");
        assert!(result.contains("only CSV and Excel"));

        let result = handler.load(&write_csv(&dir, "broken.xlsx", "binary")).await;
        assert!(result.starts_with("Error loading data: "), "got: {result}");
        assert_eq!(handler.dataset().await.unwrap().source, "sales.csv");
    }

    #[tokio::test]
    async fn load_accepts_excel_workbook() {
        let handler = AnalyticsHandler::new(None, &OpenAiConfig::default());
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/people.xlsx");

        let result = handler.load(&path).await;
        assert_eq!(
            result,
            "Loaded data with 3 rows and columns: ['name', 'department', 'salary']"
        );

        let answer = handler.analyze("Average salary?").await.unwrap();
        assert!(answer.contains("salary"), "got: {answer}");
        assert!(answer.contains("1500.166667"), "got: {answer}");
    }

    #[tokio::test]
    async fn without_llm_returns_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let handler = AnalyticsHandler::new(None, &OpenAiConfig::default());
        handler.load(&write_csv(&dir, "sales.csv", SALES)).await;

        let answer = handler.analyze("Which region sells most?").await.unwrap();
        assert!(answer.starts_with("LLM not available. Here are the basic statistics:\n"));
        assert!(answer.contains("revenue"));
        assert!(answer.contains("75.000000"));
    }

    #[tokio::test]
    async fn with_llm_prompts_analytics_model() {
        let dir = tempfile::tempdir().unwrap();
        let mock = Arc::new(MockCompletion::always("North has the highest revenue."));
        let completion: Arc<dyn CompletionAdapter> = mock.clone();
        let handler = AnalyticsHandler::new(Some(completion), &OpenAiConfig::default());
        handler.load(&write_csv(&dir, "sales.csv", SALES)).await;

        let answer = handler.analyze("Which region sells most?").await.unwrap();
        assert_eq!(answer, "North has the highest revenue.");

        let request = &mock.requests().await[0];
        assert_eq!(request.model, "gpt-4");
        assert_eq!(request.temperature, 0.0);
        assert!(request.prompt.contains("Columns: ['region', 'revenue']"));
        assert!(request.prompt.contains("North,100"));
        assert!(request.prompt.ends_with("Question: Which region sells most?\nAnswer:"));
    }

    #[tokio::test]
    async fn completion_failure_becomes_analysis_failed() {
        let dir = tempfile::tempdir().unwrap();
        let completion: Arc<dyn CompletionAdapter> = Arc::new(MockCompletion::failing("timeout"));
        let handler = AnalyticsHandler::new(Some(completion), &OpenAiConfig::default());
        handler.load(&write_csv(&dir, "sales.csv", SALES)).await;

        let answer = handler.analyze("trend").await.unwrap();
        assert!(answer.starts_with("Analysis failed: "), "got: {answer}");
    }
}
