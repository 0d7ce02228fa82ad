//! Error types for executed requests

use serde_json::Value;
use thiserror::Error;

/// Errors surfaced by [`crate::RestClient`] operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The backend answered with a non-2xx status. `message` is the
    /// backend's `message` field when the error body is JSON.
    #[error("Request to {url} failed with status {status}: {message}")]
    Request {
        status: u16,
        url: String,
        message: String,
        body: Value,
    },

    /// Network-level failure: DNS, connection refused, timeout, or a base
    /// URL the transport cannot parse.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body was not valid JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// A record or argument map that could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A 2xx response whose shape does not match the operation, e.g. a
    /// non-array body returned for `read`.
    #[error("Unexpected response shape: {0}")]
    UnexpectedBody(String),
}

impl RestError {
    /// The HTTP status code, for `Request` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            RestError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
