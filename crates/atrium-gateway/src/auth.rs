// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional bearer-token authentication for `/api/*` routes.
//!
//! With no token configured the API is open, as it is by default.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::Response,
};

#[derive(Clone, Default)]
pub struct AuthConfig {
    /// Expected bearer token. `None` disables authentication.
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

impl AuthConfig {
    /// Whether `header` (the raw `Authorization` value) is acceptable.
    pub fn permits(&self, header: Option<&str>) -> bool {
        let Some(expected) = self.bearer_token.as_deref() else {
            return true;
        };
        header
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|token| token == expected)
    }
}

/// Rejects requests without the configured bearer token.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    if auth.permits(header) {
        Ok(next.run(request).await)
    } else {
        tracing::debug!("rejected request with missing or wrong bearer token");
        Err(StatusCode::UNAUTHORIZED)
    }
}
