//! Unified error handling for the category server.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use catalog_core::{MessageResponse, ValidationErrorResponse};

use crate::db::RepositoryError;
use crate::services::categories::{CategoryError, outcome};

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Category operation failed.
    #[error("Category error: {0}")]
    Category(#[from] CategoryError),

    /// Database operation failed outside the category service.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Missing or mismatched CSRF token / AJAX header.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(format!("session error: {err}"))
    }
}

impl AppError {
    const fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Internal(_) | Self::Category(CategoryError::Repository(_))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let message = |status: StatusCode, message: &str| {
            (
                status,
                Json(MessageResponse {
                    message: message.to_string(),
                }),
            )
                .into_response()
        };

        match self {
            Self::Category(CategoryError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { errors }),
            )
                .into_response(),
            Self::Category(CategoryError::NotFound(_)) | Self::NotFound(_) => {
                message(StatusCode::NOT_FOUND, outcome::NOT_FOUND)
            }
            Self::Category(CategoryError::HasProducts { .. }) => {
                message(StatusCode::CONFLICT, outcome::HAS_PRODUCTS)
            }
            // Don't expose internal error details to clients
            Self::Category(CategoryError::Repository(_)) | Self::Database(_) | Self::Internal(_) => {
                message(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::Forbidden(reason) => message(StatusCode::FORBIDDEN, &reason),
            Self::BadRequest(reason) => message(StatusCode::BAD_REQUEST, &reason),
        }
    }
}
