// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP endpoint tests driven through `tower::ServiceExt::oneshot`.

use atrium_gateway::{build_router, AuthConfig, GatewayState};
use atrium_test_utils::TestHarness;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

const BOUNDARY: &str = "atrium-test-boundary";

fn app(harness: &TestHarness, bearer_token: Option<&str>) -> Router {
    build_router(GatewayState {
        dispatcher: harness.dispatcher.clone(),
        system_name: "Enterprise AI Assistant".to_string(),
        auth: AuthConfig {
            bearer_token: bearer_token.map(str::to_string),
        },
        documents_dir: harness.documents_dir().to_path_buf(),
        datasets_dir: harness.datasets_dir().to_path_buf(),
        shutdown: CancellationToken::new(),
    })
}

fn chat_request(query: &str) -> Request<Body> {
    Request::post("/api/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap()
}

fn upload_request(uri: &str, filename: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: application/octet-stream\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::post(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_capabilities() {
    let harness = TestHarness::builder().build().unwrap();
    let response = app(&harness, None)
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "status": "active",
            "system": "Enterprise AI Assistant",
            "capabilities": ["RAG", "Analytics", "Recommendations"],
            "components": [
                {
                    "name": "completion",
                    "kind": "Completion",
                    "status": "disabled: no API key configured"
                },
                {
                    "name": "in-memory-index",
                    "kind": "DocumentIndex",
                    "version": "0.1.0",
                    "status": "degraded: no documents ingested"
                }
            ]
        })
    );
}

#[tokio::test]
async fn health_tracks_llm_and_ingested_documents() {
    let harness = TestHarness::builder()
        .with_constant_response("GENERAL")
        .build()
        .unwrap();
    let router = app(&harness, None);

    let response = router
        .clone()
        .oneshot(upload_request("/api/upload/document", "leave.md", "Annual leave is 20 days."))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let components = json_body(response).await["components"].clone();
    assert_eq!(components[0]["name"], "mock-completion");
    assert_eq!(components[0]["status"], "healthy");
    assert_eq!(components[1]["status"], "healthy");
}

#[tokio::test]
async fn chat_routes_by_keywords_without_llm() {
    let harness = TestHarness::builder().build().unwrap();
    let response = app(&harness, None)
        .oneshot(chat_request("Recommend a strategy for retention"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "intent": "ACTION_QUERY",
            "provenance": "fallback",
            "response": "Recommendation Engine Unavailable (No API Key)."
        })
    );
}

#[tokio::test]
async fn chat_uses_llm_label_when_available() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["ANALYTICS_QUERY"])
        .build()
        .unwrap();
    let response = app(&harness, None)
        .oneshot(chat_request("Good morning!"))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["intent"], "ANALYTICS_QUERY");
    assert_eq!(body["provenance"], "primary");
    assert_eq!(body["response"], "No data loaded. Please upload a dataset first.");
}

#[tokio::test]
async fn empty_query_is_rejected() {
    let harness = TestHarness::builder().build().unwrap();
    let response = app(&harness, None)
        .oneshot(chat_request("   "))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn handler_failure_is_a_server_error() {
    let harness = TestHarness::builder()
        .with_failing_completion("503 Service Unavailable")
        .build()
        .unwrap();
    let response = app(&harness, None)
        .oneshot(chat_request("Recommend a strategy for retention"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn document_upload_is_stored_and_ingested() {
    let harness = TestHarness::builder().build().unwrap();
    let response = app(&harness, None)
        .oneshot(upload_request(
            "/api/upload/document",
            "../policies/leave.md",
            "Employees accrue 20 days of annual leave per year.",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({
            "filename": "leave.md",
            "status": "uploaded",
            "ingestion": "Ingested 1 chunks from leave.md"
        })
    );
    assert!(harness.documents_dir().join("leave.md").is_file());
}

#[tokio::test]
async fn pdf_upload_is_unsupported() {
    let harness = TestHarness::builder().build().unwrap();
    let response = app(&harness, None)
        .oneshot(upload_request("/api/upload/document", "handbook.pdf", "%PDF-1.4"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(!harness.documents_dir().join("handbook.pdf").exists());
}

#[tokio::test]
async fn dataset_upload_reports_load_result() {
    let harness = TestHarness::builder().build().unwrap();
    let router = app(&harness, None);

    let response = router
        .clone()
        .oneshot(upload_request(
            "/api/upload/data",
            "staff.csv",
            "dept,attrition\nSales,4\nHR,2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["filename"], "staff.csv");
    assert_eq!(body["status"], "uploaded");
    assert_eq!(
        body["load_result"],
        "Loaded data with 2 rows and columns: ['dept', 'attrition']"
    );

    let response = router
        .oneshot(chat_request("show average attrition"))
        .await
        .unwrap();
    let body = json_body(response).await;
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("LLM not available. Here are the basic statistics:"));
}

#[tokio::test]
async fn upload_without_file_field_is_rejected() {
    let harness = TestHarness::builder().build().unwrap();
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{BOUNDARY}--\r\n"
    );
    let request = Request::post("/api/upload/data")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app(&harness, None).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bearer_token_guards_api_but_not_health() {
    let harness = TestHarness::builder().build().unwrap();
    let router = app(&harness, Some("s3cret"));

    let health = router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let denied = router
        .clone()
        .oneshot(chat_request("Good morning!"))
        .await
        .unwrap();
    assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

    let mut request = chat_request("Good morning!");
    request.headers_mut().insert(
        header::AUTHORIZATION,
        "Bearer s3cret".parse().unwrap(),
    );
    let allowed = router.oneshot(request).await.unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
}
