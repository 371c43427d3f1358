// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Zephyr.

use thiserror::Error;

/// Top-level error type for all Zephyr operations.
///
/// None of these ever leave the inbound message entry point; the bridge turns
/// them into log events there.
#[derive(Debug, Error)]
pub enum ZephyrError {
    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid checkout endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    // -- Wire protocol --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    // -- Platform bridge --
    #[error("web surface error: {0}")]
    Surface(String),

    #[error("URL intent failed: {0}")]
    Intent(String),

    #[error("URL intent timed out after {0} ms")]
    IntentTimedOut(u64),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ZephyrError>;
