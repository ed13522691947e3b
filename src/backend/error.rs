//! Error types for backend network-allocation and directory calls.

use serde::Deserialize;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = std::result::Result<T, BackendError>;

/// Per-field error object reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl FieldError {
    pub fn new(field: Option<&str>, message: impl Into<String>) -> Self {
        Self { field: field.map(str::to_string), code: None, message: message.into() }
    }
}

/// Failure of a backend call.
///
/// `status` is `None` when no HTTP response was received (connection refused,
/// timeout, undecodable body).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("backend request failed ({}): {message}", status.map_or_else(|| "transport".to_string(), |s| s.to_string()))]
pub struct BackendError {
    pub status: Option<u16>,
    pub code: Option<String>,
    pub message: String,
    pub errors: Vec<FieldError>,
}

/// Error body shape shared by the backend services
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl BackendError {
    /// Error response with an HTTP status
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self { status: Some(status), code: None, message: message.into(), errors: Vec::new() }
    }

    /// Failure before any HTTP response was received
    pub fn transport(message: impl Into<String>) -> Self {
        Self { status: None, code: None, message: message.into(), errors: Vec::new() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::status(404, message)
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_field_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = errors;
        self
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }

    /// Build from a non-success response body; bodies that are not the
    /// structured error shape are kept as the plain message.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self {
                status: Some(status),
                code: parsed.code,
                message: parsed.message.unwrap_or_else(|| default_message(status, body)),
                errors: parsed.errors,
            },
            Err(_) => Self::status(status, default_message(status, body)),
        }
    }
}

fn default_message(status: u16, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("backend responded with status {}", status)
    } else {
        trimmed.to_string()
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(error: reqwest::Error) -> Self {
        Self::transport(error.to_string())
    }
}
