//! Error types for the vault API client.
//!
//! # Design
//! The taxonomy mirrors who gets to choose the user-facing message:
//! a `Business` error carries the server's own message verbatim, a
//! `Transport` error carries an optional status and an optional
//! server-supplied message alongside the transport's own text, and the
//! serialization variants are unclassified failures that the normalizer
//! replaces with a fixed fallback string.

use thiserror::Error;

/// Errors produced by the dispatcher and the resource call sites.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered normally but flagged `error: true` in the
    /// envelope. The message is display-ready as-is.
    #[error("{0}")]
    Business(String),

    /// The round trip failed, or the server answered with a status outside
    /// the accepted set {2xx, 401}.
    #[error("{detail}")]
    Transport {
        /// Status code, when the server answered at all.
        status: Option<u16>,
        /// Message from the rejected response's envelope, when it parsed.
        server_message: Option<String>,
        /// The transport's own text.
        detail: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// Transport error for a round trip that never produced a status.
    pub fn network(detail: impl Into<String>) -> Self {
        ApiError::Transport {
            status: None,
            server_message: None,
            detail: detail.into(),
        }
    }

    /// Transport error for a status outside the accepted set.
    pub fn status(status: u16, server_message: Option<String>) -> Self {
        ApiError::Transport {
            status: Some(status),
            server_message,
            detail: format!("unexpected HTTP status {status}"),
        }
    }

    /// Status code carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
