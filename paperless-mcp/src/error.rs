//! Unified error handling for the Paperless MCP library
//!
//! Tool operations never surface raw errors to the transport; every failure
//! is shaped into a tagged payload with a stable `error` kind that callers
//! can match on.

use serde_json::{json, Value};
use thiserror::Error;

/// The main error type for Paperless tool operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ToolError {
    /// Bad or missing settings
    #[error("{0}")]
    Config(String),

    /// Caller input failed validation
    #[error("{message}")]
    InvalidRequest {
        /// Human-readable description of what was wrong
        message: String,
        /// Permitted values, when the request named an unknown one
        allowed: Option<Vec<String>>,
    },

    /// Paperless returned a non-2xx status
    #[error("Paperless returned HTTP {status}")]
    PaperlessHttp {
        /// HTTP status code from the remote
        status: u16,
        /// Response body, truncated to 500 characters
        body: String,
    },

    /// Transport-level failure talking to Paperless
    #[error("Paperless request failed: {0}")]
    PaperlessRequest(String),

    /// Remote payload shape violated the expected contract
    #[error("{0}")]
    UnexpectedResponse(String),

    /// Local file missing during upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Local file I/O failure during upload
    #[error("{0}")]
    File(String),
}

impl ToolError {
    /// Construct an invalid-request error without an allowed-values list.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
            allowed: None,
        }
    }

    /// The stable payload tag for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::PaperlessHttp { .. } => "paperless_http_error",
            Self::PaperlessRequest(_) => "paperless_request_error",
            Self::UnexpectedResponse(_) => "unexpected_response",
            Self::FileNotFound(_) => "file_not_found",
            Self::File(_) => "file_error",
        }
    }

    /// HTTP status code, for remote HTTP errors only.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::PaperlessHttp { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Shape this error into the structured payload returned to callers.
    pub fn payload(&self) -> Value {
        let message = match self {
            // The HTTP error message carries the (truncated) response body,
            // not the Display form.
            Self::PaperlessHttp { body, .. } => body.clone(),
            other => other.to_string(),
        };
        let mut payload = json!({
            "error": self.kind(),
            "message": message,
        });
        if let Some(status) = self.status_code() {
            payload["status_code"] = json!(status);
        }
        if let Self::InvalidRequest {
            allowed: Some(allowed),
            ..
        } = self
        {
            payload["allowed"] = json!(allowed);
        }
        payload
    }
}

/// Result type alias for Paperless tool operations
pub type Result<T> = std::result::Result<T, ToolError>;
