// SPDX-License-Identifier: MIT
// Copyright 2026 NearBuy Developers

//! Agent error types.
//!
//! Nothing in the reporting pipeline propagates errors to the embedding
//! host: the outermost adapters convert every `Err` into a log line or a
//! boolean/option return. The enum exists so the failure paths themselves
//! stay testable as values.

/// Error type for the location-reporting pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Missing stored credentials")]
    MissingCredentials,

    #[error("Backend API error: {0}")]
    Api(String),

    #[error("Secure store error: {0}")]
    Storage(String),

    #[error("Platform error: {0}")]
    Platform(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;
