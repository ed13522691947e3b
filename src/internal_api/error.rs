//! Internal API Error Types
//!
//! The error taxonomy every network operation reports, and its translation
//! from backend and schema failures. Conversion to HTTP responses happens at
//! the edge via [`ApiError`].

use thiserror::Error;
use tracing::warn;

use crate::api::error::ApiError;
use crate::backend::{BackendError, FieldError};
use crate::observability::metrics::record_backend_error;
use crate::validation::{render_property_message, SchemaError};

/// Message shown when the backend could not be reached at all
pub const BACKEND_UNAVAILABLE: &str = "network service unavailable";

/// Message shown when the fabrics feature gate is closed
pub const FABRICS_DISABLED: &str = "fabrics not enabled for this datacenter";

/// Underlying failure kept for diagnostics, never shown raw to callers
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorCause {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Internal API error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InternalError {
    /// Bad, missing or malformed input, or a forbidden operation
    #[error("{}", render_property_message(property.as_deref(), message))]
    InvalidArgument { message: String, property: Option<String>, source: Option<ErrorCause> },

    /// Target resource absent upstream
    #[error("{message}")]
    ResourceNotFound { message: String, source: Option<ErrorCause> },

    /// Backend consistency fault or unreachable collaborator
    #[error("{message}")]
    Internal { message: String, source: Option<ErrorCause> },

    /// Feature not available in this deployment
    #[error("{message}")]
    NotImplemented { message: String },
}

impl InternalError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument { message: message.into(), property: None, source: None }
    }

    /// Create an invalid argument error naming the offending property
    pub fn invalid_property(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
            property: Some(property.into()),
            source: None,
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::ResourceNotFound { message: message.into(), source: None }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), source: None }
    }

    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented { message: message.into() }
    }

    /// The fabrics feature gate is closed
    pub fn fabrics_disabled() -> Self {
        Self::not_implemented(FABRICS_DISABLED)
    }

    /// Attach the diagnostic cause
    pub fn with_cause(mut self, cause: impl Into<ErrorCause>) -> Self {
        let cause = Some(cause.into());
        match &mut self {
            Self::InvalidArgument { source, .. }
            | Self::ResourceNotFound { source, .. }
            | Self::Internal { source, .. } => *source = cause,
            Self::NotImplemented { .. } => {}
        }
        self
    }

    /// Stable name of the error kind, as reported to callers
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => "InvalidArgument",
            Self::ResourceNotFound { .. } => "ResourceNotFound",
            Self::Internal { .. } => "Internal",
            Self::NotImplemented { .. } => "NotImplemented",
        }
    }

    /// Property named by an invalid argument error
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { property, .. } => property.as_deref(),
            _ => None,
        }
    }

    pub fn cause(&self) -> Option<&ErrorCause> {
        match self {
            Self::InvalidArgument { source, .. }
            | Self::ResourceNotFound { source, .. }
            | Self::Internal { source, .. } => source.as_ref(),
            Self::NotImplemented { .. } => None,
        }
    }
}

/// Render backend field errors as one caller-facing message, in order.
///
/// Falls back to the backend's own message when there are no field errors.
pub fn compose_backend_message(error: &BackendError) -> String {
    if error.errors.is_empty() {
        return error.message.clone();
    }

    error.errors.iter().map(render_field_error).collect::<Vec<_>>().join(", ")
}

fn render_field_error(error: &FieldError) -> String {
    render_property_message(error.field.as_deref(), &error.message)
}

impl From<BackendError> for InternalError {
    fn from(err: BackendError) -> Self {
        record_backend_error(err.status);
        warn!(
            status = ?err.status,
            code = ?err.code,
            error = %err,
            "Network service call failed"
        );

        match err.status {
            None => Self::internal(BACKEND_UNAVAILABLE).with_cause(err),
            Some(404) => Self::not_found(compose_backend_message(&err)).with_cause(err),
            Some(_) => Self::invalid_argument(compose_backend_message(&err)).with_cause(err),
        }
    }
}

impl From<SchemaError> for InternalError {
    fn from(err: SchemaError) -> Self {
        match &err {
            SchemaError::Invalid { property, message, .. } => Self::InvalidArgument {
                message: message.clone(),
                property: property.clone(),
                source: Some(err.into()),
            },
            SchemaError::Compilation { .. } => {
                Self::internal("request schema unavailable").with_cause(err)
            }
        }
    }
}

/// Convert InternalError to ApiError for REST handlers
impl From<InternalError> for ApiError {
    fn from(err: InternalError) -> Self {
        let message = err.to_string();
        match err {
            InternalError::InvalidArgument { .. } => ApiError::InvalidArgument(message),
            InternalError::ResourceNotFound { .. } => ApiError::ResourceNotFound(message),
            InternalError::Internal { .. } => ApiError::Internal(message),
            InternalError::NotImplemented { .. } => ApiError::NotImplemented(message),
        }
    }
}
