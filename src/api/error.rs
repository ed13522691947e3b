use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::Error;

#[derive(Debug)]
pub enum ApiError {
    InvalidArgument(String),
    ResourceNotFound(String),
    Unauthorized(String),
    Internal(String),
    NotImplemented(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::CONFLICT,
            ApiError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "InvalidArgument",
            ApiError::ResourceNotFound(_) => "ResourceNotFound",
            ApiError::Unauthorized(_) => "Unauthorized",
            ApiError::Internal(_) => "Internal",
            ApiError::NotImplemented(_) => "NotImplemented",
        }
    }

    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ApiError::InvalidArgument(msg.into())
    }

    pub fn unauthorized<S: Into<String>>(msg: S) -> Self {
        ApiError::Unauthorized(msg.into())
    }
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error kind
    #[schema(example = "InvalidArgument")]
    pub code: String,
    /// Caller-facing message
    #[schema(example = "property \"gateway\": must be an IPv4 address")]
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let code = self.code().to_string();

        let message = match self {
            ApiError::InvalidArgument(msg)
            | ApiError::ResourceNotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Internal(msg)
            | ApiError::NotImplemented(msg) => msg,
        };

        (status, Json(ErrorResponse { code, message })).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}
