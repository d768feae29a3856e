//! Structured error handling for the HTTP API.
//!
//! Provides type-safe error handling with automatic conversion to JSON
//! responses. Internal details are logged and only attached to the response
//! body when the deployment explicitly asks for it.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::envelope::ApiResponse;
use crate::validation::Rejection;

/// Message sent to clients for every 5xx response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong.";

/// Application error type with automatic response conversion.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Internal: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a conflict error for a value that is already stored.
    ///
    /// `AppError::already_exists("Email")` reads "Email already exists."
    #[must_use]
    pub fn already_exists(what: &str) -> Self {
        Self::Conflict(format!("{what} already exists."))
    }

    /// Create an invalid-argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert into a JSON response, attaching internal detail to 5xx bodies
    /// only when `expose_detail` is set.
    #[must_use]
    pub fn into_response_with_detail(self, expose_detail: bool) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::InvalidArgument(msg) | Self::Conflict(msg) => ApiResponse::<()>::failure(msg),
            Self::Unavailable(ref detail) | Self::Internal(ref detail) => {
                error!(error = %detail, "Request failed");
                let body = ApiResponse::<()>::failure(INTERNAL_ERROR_MESSAGE);
                if expose_detail {
                    body.with_error(self.to_string())
                } else {
                    body
                }
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<Rejection> for AppError {
    fn from(rejection: Rejection) -> Self {
        Self::InvalidArgument(rejection.reason().to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with_detail(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_exists_formats_message() {
        let err = AppError::already_exists("Phone number");
        assert_eq!(err.to_string(), "Phone number already exists.");
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::invalid("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unavailable("db down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(AppError::Conflict("dup".into()).status_code(), StatusCode::CONFLICT);
    }
}
