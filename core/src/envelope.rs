//! The response envelope shared by every JSON route.
//!
//! # Design
//! All routes answer with the same nested shape:
//! `{ "error": bool, "message": string, "data": … }`. When `error` is true
//! the message is the display-ready failure text and `data` is meaningless;
//! when `error` is false the payload lives under `data`. The upstream API
//! flattened some payloads next to the protocol fields in older revisions;
//! this client supports only the nested shape.

use serde::Deserialize;

use crate::error::ApiError;

/// Decoded body of any JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub error: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

/// Envelope with an untyped payload, for routes where only the flag and
/// message matter.
pub type RawEnvelope = Envelope<serde_json::Value>;

impl<T> Envelope<T> {
    /// Extract the payload, turning a flagged envelope into a business
    /// error with the server's message.
    pub fn require_data(self) -> Result<T, ApiError> {
        if self.error {
            return Err(ApiError::Business(self.message));
        }
        self.data
            .ok_or_else(|| ApiError::Deserialization("missing data in response envelope".to_string()))
    }

    /// Check the flag on a response whose payload is irrelevant.
    pub fn ack(self) -> Result<(), ApiError> {
        if self.error {
            return Err(ApiError::Business(self.message));
        }
        Ok(())
    }
}
