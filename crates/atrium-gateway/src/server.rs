// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Axum server setup and shared state.

use std::path::PathBuf;
use std::sync::Arc;

use atrium_agent::Dispatcher;
use atrium_core::AtriumError;
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::auth::{auth_middleware, AuthConfig};
use crate::handlers;

/// Largest accepted upload body.
const UPLOAD_LIMIT_BYTES: usize = 25 * 1024 * 1024;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub dispatcher: Arc<Dispatcher>,
    /// System name reported by the health endpoint.
    pub system_name: String,
    pub auth: AuthConfig,
    pub documents_dir: PathBuf,
    pub datasets_dir: PathBuf,
    /// Cancelled on shutdown; in-flight classification falls back to keywords.
    pub shutdown: CancellationToken,
}

/// Listener configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Build the gateway application.
///
/// `GET /` is public. `/api/*` routes sit behind the bearer-token check,
/// which passes everything through when no token is configured.
pub fn build_router(state: GatewayState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::get_health))
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/api/chat", post(handlers::post_chat))
        .route("/api/upload/document", post(handlers::post_upload_document))
        .route("/api/upload/data", post(handlers::post_upload_data))
        .layer(DefaultBodyLimit::max(UPLOAD_LIMIT_BYTES))
        .route_layer(axum_middleware::from_fn_with_state(
            state.auth.clone(),
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve the gateway until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), AtriumError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AtriumError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| AtriumError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("Gateway server stopped");
    Ok(())
}
