// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway API.

use std::path::{Path, PathBuf};

use atrium_agent::{ComponentHealth, DispatchResponse};
use atrium_core::AtriumError;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

/// Capabilities advertised by the health endpoint.
pub const CAPABILITIES: [&str; 3] = ["RAG", "Analytics", "Recommendations"];

/// Name of the multipart field carrying the uploaded file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub system: String,
    pub capabilities: Vec<String>,
    pub components: Vec<ComponentHealth>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub query: String,
    /// Accepted for client compatibility; conversations are stateless.
    #[serde(default)]
    pub context_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentUploadResponse {
    pub filename: String,
    pub status: String,
    pub ingestion: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataUploadResponse {
    pub filename: String,
    pub status: String,
    pub load_result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// GET /
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "active".to_string(),
        system: state.system_name.clone(),
        capabilities: CAPABILITIES.iter().map(|c| c.to_string()).collect(),
        components: state.dispatcher.health().await,
    })
}

/// POST /api/chat
pub async fn post_chat(
    State(state): State<GatewayState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<DispatchResponse>, Response> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(error_response(StatusCode::BAD_REQUEST, "query must not be empty"));
    }

    tracing::debug!(context_id = ?request.context_id, "chat request");
    state
        .dispatcher
        .handle_with_cancel(query, &state.shutdown)
        .await
        .map(Json)
        .map_err(|e| error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
}

/// POST /api/upload/document
pub async fn post_upload_document(
    State(state): State<GatewayState>,
    multipart: Multipart,
) -> Result<Json<DocumentUploadResponse>, Response> {
    let (filename, path) = save_upload(multipart, &state.documents_dir).await?;

    let ingestion = match state.dispatcher.documents().ingest(&path).await {
        Ok(ingestion) => ingestion,
        Err(e) => {
            // Rejected uploads must not be restored on the next start.
            if let Err(remove) = tokio::fs::remove_file(&path).await {
                tracing::warn!(path = %path.display(), error = %remove, "failed to remove rejected upload");
            }
            let status = match e {
                AtriumError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            return Err(error_response(status, e.to_string()));
        }
    };

    tracing::info!(filename = %filename, "document uploaded");
    Ok(Json(DocumentUploadResponse {
        filename,
        status: "uploaded".to_string(),
        ingestion,
    }))
}

/// POST /api/upload/data
pub async fn post_upload_data(
    State(state): State<GatewayState>,
    multipart: Multipart,
) -> Result<Json<DataUploadResponse>, Response> {
    let (filename, path) = save_upload(multipart, &state.datasets_dir).await?;
    let load_result = state.dispatcher.analyst().load(&path).await;

    tracing::info!(filename = %filename, "dataset uploaded");
    Ok(Json(DataUploadResponse {
        filename,
        status: "uploaded".to_string(),
        load_result,
    }))
}

/// Reduce a client-supplied file name to its final path component.
///
/// Both `/` and `\` count as separators. Returns `None` for names that
/// are empty or only navigate (`.`, `..`).
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    match name {
        "" | "." | ".." => None,
        other => Some(other.to_string()),
    }
}

/// Store the `file` field of `multipart` under `dir`.
async fn save_upload(mut multipart: Multipart, dir: &Path) -> Result<(String, PathBuf), Response> {
    let bad_request = |msg: String| error_response(StatusCode::BAD_REQUEST, msg);

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .and_then(sanitize_filename)
            .ok_or_else(|| bad_request("upload is missing a file name".to_string()))?;
        let bytes = field
            .bytes()
            .await
            .map_err(|e| bad_request(format!("failed to read upload: {e}")))?;

        let path = dir.join(&filename);
        let write = async {
            tokio::fs::create_dir_all(dir).await?;
            tokio::fs::write(&path, &bytes).await
        };
        write.await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "failed to store upload");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, format!("failed to store upload: {e}"))
        })?;

        return Ok((filename, path));
    }

    Err(bad_request(format!("missing multipart field '{FILE_FIELD}'")))
}
