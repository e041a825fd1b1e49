//! API error types.
//!
//! Defined in `wkquiz-core` so callers can downcast an `anyhow::Error`
//! and tell an API-reported failure apart from a transport failure.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the study API.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The API answered with an error envelope (`code` + `error`).
    #[error("Error {code}: {message}")]
    Api { code: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The response decoded but was not the expected shape.
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
}

/// The error envelope the API returns in place of a payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub code: u16,
    pub error: String,
}

impl ErrorEnvelope {
    /// Try to read an error envelope out of a raw response body.
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        if value.get("error").is_none() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}

impl From<ErrorEnvelope> for ApiError {
    fn from(envelope: ErrorEnvelope) -> Self {
        ApiError::Api {
            code: envelope.code,
            message: envelope.error,
        }
    }
}

impl ApiError {
    /// Classify a raw non-list body: an error envelope becomes
    /// [`ApiError::Api`], anything else is an unexpected payload.
    pub fn from_unexpected(value: &serde_json::Value, expected: &str) -> Self {
        match ErrorEnvelope::from_value(value) {
            Some(envelope) => envelope.into(),
            None => ApiError::UnexpectedPayload(format!("expected {expected}")),
        }
    }
}
