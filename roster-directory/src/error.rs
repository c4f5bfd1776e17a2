//! Error types for directory acquisition
//!
//! These never leave [`crate::DirectoryClient::fetch_employees`]; they exist
//! so the fallback path can log what actually went wrong.

use thiserror::Error;

/// Why a directory fetch could not produce live records.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0}ms")]
    Timeout(u64),

    /// Endpoint answered with a non-success status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Body was not JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON did not carry `TABLE_DATA.data` as a list of rows
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),
}

impl DirectoryError {
    /// Classify a reqwest failure, separating timeouts from other transport errors.
    pub fn from_transport(err: reqwest::Error, timeout_ms: u64) -> Self {
        if err.is_timeout() {
            DirectoryError::Timeout(timeout_ms)
        } else {
            DirectoryError::Http(err)
        }
    }
}
