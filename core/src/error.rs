//! Error types for the Loklak API client.
//!
//! # Design
//! Three failure classes only: the server could not be reached, the body was
//! not the JSON we expected, or the client was configured with a bad URL.
//! Non-2xx statuses are not errors here; the body is handed back as-is and
//! the caller decides what a 404 or 500 means for them.

use thiserror::Error;

/// Errors returned by the client, its transports, and the decoder.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed to reach the server or to read the body.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The response body is not valid JSON, or does not match the requested type.
    #[error("decode failed: {0}")]
    Decode(String),

    /// A base URL or endpoint path could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
