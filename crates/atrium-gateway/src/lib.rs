// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Atrium assistant.
//!
//! Exposes chat and upload endpoints over axum, in front of the
//! [`Dispatcher`](atrium_agent::Dispatcher).
//!
//! | Route | Auth | Purpose |
//! |---|---|---|
//! | `GET /` | none | Health and capabilities |
//! | `POST /api/chat` | bearer (optional) | Route and answer one query |
//! | `POST /api/upload/document` | bearer (optional) | Store and ingest a text document |
//! | `POST /api/upload/data` | bearer (optional) | Store and load a CSV dataset |

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use server::{build_router, start_server, GatewayState, ServerConfig};
