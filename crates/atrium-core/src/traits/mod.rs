// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions at the seams between the router, its external
//! collaborators and the dispatch layer.
//!
//! Adapters use `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod completion;
pub mod handlers;
pub mod index;

pub use adapter::PluginAdapter;
pub use completion::CompletionAdapter;
pub use handlers::{DocumentQa, Recommender, TabularAnalyst};
pub use index::DocumentIndex;
