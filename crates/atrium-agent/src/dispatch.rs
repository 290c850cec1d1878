// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intent dispatch: route a query, then hand it to the matching handler.

use std::path::Path;
use std::sync::Arc;

use atrium_config::AtriumConfig;
use atrium_core::traits::{
    CompletionAdapter, DocumentIndex, DocumentQa, Recommender, TabularAnalyst,
};
use atrium_core::types::{AdapterType, HealthStatus};
use atrium_core::{AtriumError, ClassifierResult, Intent, Provenance};
use atrium_router::IntentRouter;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::analytics::AnalyticsHandler;
use crate::index::InMemoryIndex;
use crate::rag::{ingest_dir, RagHandler};
use crate::recommendation::RecommendationHandler;

/// The answer to one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchResponse {
    pub intent: Intent,
    pub provenance: Provenance,
    pub response: String,
}

/// Health of one external-facing component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub kind: AdapterType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub status: String,
}

impl ComponentHealth {
    fn checked(
        name: &str,
        kind: AdapterType,
        version: semver::Version,
        result: Result<HealthStatus, AtriumError>,
    ) -> Self {
        let status = match result {
            Ok(status) => status.to_string(),
            Err(e) => HealthStatus::Unhealthy(e.to_string()).to_string(),
        };
        Self {
            name: name.to_string(),
            kind,
            version: Some(version.to_string()),
            status,
        }
    }
}

/// Routes queries and dispatches them to the three handlers.
///
/// | Intent | Handler |
/// |---|---|
/// | `DOCUMENT_QUERY` | [`DocumentQa::answer`] |
/// | `ANALYTICS_QUERY` | [`TabularAnalyst::analyze`] |
/// | `ACTION_QUERY`, `GENERAL` | [`Recommender::recommend`] |
pub struct Dispatcher {
    router: Arc<IntentRouter>,
    documents: Arc<dyn DocumentQa>,
    analyst: Arc<dyn TabularAnalyst>,
    recommender: Arc<dyn Recommender>,
    completion: Option<Arc<dyn CompletionAdapter>>,
    index: Option<Arc<dyn DocumentIndex>>,
}

impl Dispatcher {
    pub fn new(
        router: Arc<IntentRouter>,
        documents: Arc<dyn DocumentQa>,
        analyst: Arc<dyn TabularAnalyst>,
        recommender: Arc<dyn Recommender>,
    ) -> Self {
        Self {
            router,
            documents,
            analyst,
            recommender,
            completion: None,
            index: None,
        }
    }

    /// Report `completion` in [`health`](Self::health).
    pub fn with_completion(mut self, completion: Arc<dyn CompletionAdapter>) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Report `index` in [`health`](Self::health).
    pub fn with_index(mut self, index: Arc<dyn DocumentIndex>) -> Self {
        self.index = Some(index);
        self
    }

    /// Wire the router and the bundled handlers around one shared
    /// completion service. `None` puts every component in fallback mode.
    pub fn from_config(
        config: &AtriumConfig,
        completion: Option<Arc<dyn CompletionAdapter>>,
    ) -> Self {
        let router = IntentRouter::from_config(config, completion.clone());
        let index: Arc<dyn DocumentIndex> = Arc::new(InMemoryIndex::new());
        let documents = RagHandler::new(
            index.clone(),
            completion.clone(),
            &config.rag,
            &config.openai,
        );
        let analyst = AnalyticsHandler::new(completion.clone(), &config.openai);
        let recommender = RecommendationHandler::new(completion.clone(), &config.openai);

        let dispatcher = Self::new(
            Arc::new(router),
            Arc::new(documents),
            Arc::new(analyst),
            Arc::new(recommender),
        )
        .with_index(index);
        match completion {
            Some(completion) => dispatcher.with_completion(completion),
            None => dispatcher,
        }
    }

    /// Re-ingest documents stored in `dir` by an earlier run.
    pub async fn restore_documents(&self, dir: &Path) -> Result<usize, AtriumError> {
        let count = ingest_dir(self.documents.as_ref(), dir).await?;
        info!(dir = %dir.display(), documents = count, "stored documents restored");
        Ok(count)
    }

    /// Health of the completion service and the document index.
    ///
    /// A missing completion service is reported as disabled.
    pub async fn health(&self) -> Vec<ComponentHealth> {
        let mut components = Vec::with_capacity(2);
        match &self.completion {
            Some(completion) => components.push(ComponentHealth::checked(
                completion.name(),
                completion.adapter_type(),
                completion.version(),
                completion.health_check().await,
            )),
            None => components.push(ComponentHealth {
                name: "completion".to_string(),
                kind: AdapterType::Completion,
                version: None,
                status: "disabled: no API key configured".to_string(),
            }),
        }
        if let Some(index) = &self.index {
            components.push(ComponentHealth::checked(
                index.name(),
                index.adapter_type(),
                index.version(),
                index.health_check().await,
            ));
        }
        components
    }

    pub fn router(&self) -> &IntentRouter {
        &self.router
    }

    pub fn documents(&self) -> &dyn DocumentQa {
        self.documents.as_ref()
    }

    pub fn analyst(&self) -> &dyn TabularAnalyst {
        self.analyst.as_ref()
    }

    /// Send `query` to the handler for `intent`. Handler errors propagate.
    pub async fn dispatch(&self, intent: Intent, query: &str) -> Result<String, AtriumError> {
        match intent {
            Intent::DocumentQuery => self.documents.answer(query).await,
            Intent::AnalyticsQuery => self.analyst.analyze(query).await,
            Intent::ActionQuery | Intent::General => self.recommender.recommend(query).await,
        }
    }

    /// Route and dispatch one query.
    pub async fn handle(&self, query: &str) -> Result<DispatchResponse, AtriumError> {
        let routed = self.router.route_detailed(query).await;
        self.finish(routed, query).await
    }

    /// Like [`handle`](Self::handle), abandoning LLM classification when
    /// `cancel` fires.
    pub async fn handle_with_cancel(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<DispatchResponse, AtriumError> {
        let routed = self.router.route_with_cancel(query, cancel).await;
        self.finish(routed, query).await
    }

    async fn finish(
        &self,
        routed: ClassifierResult,
        query: &str,
    ) -> Result<DispatchResponse, AtriumError> {
        let response = self
            .dispatch(routed.intent, query)
            .await
            .inspect_err(|e| error!(intent = %routed.intent, error = %e, "handler failed"))?;

        info!(intent = %routed.intent, "request processed");
        Ok(DispatchResponse {
            intent: routed.intent,
            provenance: routed.provenance,
            response,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use atrium_test_utils::MockCompletion;

    /// Echoes which handler was hit.
    struct Echo(&'static str);

    #[async_trait]
    impl DocumentQa for Echo {
        async fn ingest(&self, _path: &Path) -> Result<String, AtriumError> {
            Ok("ingested".into())
        }
        async fn answer(&self, query: &str) -> Result<String, AtriumError> {
            Ok(format!("{}:{query}", self.0))
        }
    }

    #[async_trait]
    impl TabularAnalyst for Echo {
        async fn load(&self, _path: &Path) -> String {
            "loaded".into()
        }
        async fn analyze(&self, query: &str) -> Result<String, AtriumError> {
            Ok(format!("{}:{query}", self.0))
        }
    }

    #[async_trait]
    impl Recommender for Echo {
        async fn recommend(&self, query: &str) -> Result<String, AtriumError> {
            if query.contains("explode") {
                return Err(AtriumError::provider("upstream exploded"));
            }
            Ok(format!("{}:{query}", self.0))
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(
            Arc::new(IntentRouter::heuristic_only()),
            Arc::new(Echo("docs")),
            Arc::new(Echo("analytics")),
            Arc::new(Echo("advisor")),
        )
    }

    #[tokio::test]
    async fn dispatch_table() {
        let d = dispatcher();
        assert_eq!(d.dispatch(Intent::DocumentQuery, "q").await.unwrap(), "docs:q");
        assert_eq!(d.dispatch(Intent::AnalyticsQuery, "q").await.unwrap(), "analytics:q");
        assert_eq!(d.dispatch(Intent::ActionQuery, "q").await.unwrap(), "advisor:q");
        assert_eq!(d.dispatch(Intent::General, "q").await.unwrap(), "advisor:q");
    }

    #[tokio::test]
    async fn handle_routes_then_dispatches() {
        let response = dispatcher().handle("What is the leave policy?").await.unwrap();
        assert_eq!(response.intent, Intent::DocumentQuery);
        assert_eq!(response.provenance, Provenance::Fallback);
        assert_eq!(response.response, "docs:What is the leave policy?");
    }

    #[tokio::test]
    async fn handler_errors_propagate() {
        let err = dispatcher()
            .handle("what should we do, it will explode")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn health_without_adapters_reports_disabled_completion() {
        let health = dispatcher().health().await;
        assert_eq!(health.len(), 1);
        assert_eq!(health[0].kind, AdapterType::Completion);
        assert_eq!(health[0].status, "disabled: no API key configured");
    }

    #[tokio::test]
    async fn health_checks_each_adapter() {
        let index = Arc::new(InMemoryIndex::new());
        let d = dispatcher()
            .with_completion(Arc::new(MockCompletion::new()))
            .with_index(index.clone());

        let health = d.health().await;
        assert_eq!(health[0].name, "mock-completion");
        assert_eq!(health[0].status, "healthy");
        assert_eq!(health[0].version.as_deref(), Some("0.1.0"));
        assert_eq!(health[1].kind, AdapterType::DocumentIndex);
        assert_eq!(health[1].status, "degraded: no documents ingested");

        index
            .add(vec![atrium_core::DocumentChunk {
                source: "leave.md".into(),
                text: "Annual leave".into(),
            }])
            .await
            .unwrap();
        assert_eq!(d.health().await[1].status, "healthy");
    }

    #[test]
    fn response_serializes_wire_labels() {
        let response = DispatchResponse {
            intent: Intent::ActionQuery,
            provenance: Provenance::Primary,
            response: "ok".into(),
        };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"intent": "ACTION_QUERY", "provenance": "primary", "response": "ok"})
        );
    }
}
