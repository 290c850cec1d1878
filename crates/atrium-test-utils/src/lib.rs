// SPDX-FileCopyrightText: 2026 Atrium Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Atrium integration tests.
//!
//! Provides a mock completion adapter and a harness that wires the whole
//! request path, for fast deterministic tests without external services.
//!
//! # Components
//!
//! - [`MockCompletion`] - Completion adapter with scripted replies, failures and delays
//! - [`TestHarness`] - Router, handlers and dispatcher around a mock, in a temp dir

pub mod harness;
pub mod mock_completion;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_completion::{MockCompletion, MockReply};
