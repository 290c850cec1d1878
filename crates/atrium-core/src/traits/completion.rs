// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion adapter trait for hosted text-completion services.

use async_trait::async_trait;

use crate::error::AtriumError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{CompletionRequest, CompletionResponse};

/// Adapter for a hosted LLM completion service.
///
/// Implementations make exactly one attempt per call; callers own retry
/// and fallback policy.
#[async_trait]
pub trait CompletionAdapter: PluginAdapter {
    /// Sends a completion request and returns the full response.
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResponse, AtriumError>;
}
