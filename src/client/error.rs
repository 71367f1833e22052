//! API client error types

use thiserror::Error;

/// Errors that can occur when talking to the TaskFlow API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server rejected the credential; the cached session is gone
    #[error("Session expired or invalid, please log in again")]
    Unauthorized,

    #[error("TaskFlow API unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The cached session could not be updated
    #[error("Storage error: {0}")]
    Storage(#[from] crate::session::StorageError),
}

impl ClientError {
    /// Classify a transport error
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Whether the shell must send the user back to the login screen
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// HTTP status of an API error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Unauthorized => Some(401),
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract a human-readable message from an error body.
///
/// FastAPI-style bodies carry `{"detail": ...}`; anything else is returned
/// as-is, and an empty body falls back to `fallback`.
pub(crate) fn error_message(body: &str, fallback: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(detail) if !detail.is_null() => return detail.to_string(),
            _ => {}
        }
    }

    let body = body.trim();
    if body.is_empty() {
        fallback.to_string()
    } else {
        body.to_string()
    }
}
