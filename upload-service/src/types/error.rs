//! Universal error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::{authorization::ValidationError, media_storage::BucketError};

/// Error envelope returned to callers on every non-2xx response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

/// Application error type that wraps the HTTP error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    /// Message returned for any backend or unexpected failure. Internal
    /// detail is logged, never sent to the caller.
    pub const INTERNAL_ERROR_MESSAGE: &'static str =
        "Internal server error. Failed to generate upload URL.";

    /// Create a new application error
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!("Client error: {}", self.message),
            500..=599 => tracing::error!("Server error: {}", self.message),
            _ => {}
        }

        (self.status, Json(ErrorResponse { error: self.message })).into_response()
    }
}

/// Validation rejections surface with their specific, user-safe message
impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, err.to_string())
    }
}

/// Bucket errors collapse to a generic 500; the detail stays in the log
impl From<BucketError> for AppError {
    fn from(err: BucketError) -> Self {
        tracing::error!("Error generating presigned URL: {err}");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            Self::INTERNAL_ERROR_MESSAGE,
        )
    }
}
