// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Atrium assistant.

use thiserror::Error;

/// The primary error type used across Atrium adapters and handlers.
#[derive(Debug, Error)]
pub enum AtriumError {
    /// Configuration errors (invalid values, unusable credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// Completion service errors (transport failure, error status, malformed body).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Filesystem errors while reading or writing uploads.
    #[error("i/o error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Tabular dataset errors (parse failure, empty file).
    #[error("dataset error: {0}")]
    Dataset(String),

    /// The uploaded file type cannot be ingested.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AtriumError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        AtriumError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
