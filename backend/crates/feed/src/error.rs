//! Feed Error Types
//!
//! This module provides feed-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, field_errors::FieldErrors, kind::ErrorKind};
use thiserror::Error;

/// Feed-specific result type alias
pub type FeedResult<T> = Result<T, FeedError>;

/// Feed-specific error variants
#[derive(Debug, Error)]
pub enum FeedError {
    /// Feed item does not exist
    #[error("Not found.")]
    NotFound,

    /// Request fields failed validation
    #[error("Invalid input.")]
    Validation(FieldErrors),

    /// Already classified (authentication and permission checks)
    #[error(transparent)]
    App(#[from] AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FeedError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedError::NotFound => ErrorKind::NotFound,
            FeedError::Validation(_) => ErrorKind::BadRequest,
            FeedError::App(e) => e.kind(),
            FeedError::Database(_) | FeedError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            FeedError::NotFound => AppError::not_found("Not found."),
            FeedError::Validation(errors) => AppError::validation(errors),
            FeedError::App(e) => e,
            FeedError::Database(e) => AppError::from(e),
            FeedError::Internal(_) => AppError::internal("Internal server error."),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            FeedError::Database(e) => {
                tracing::error!(error = %e, "Feed database error");
            }
            FeedError::Internal(msg) => {
                tracing::error!(message = %msg, "Feed internal error");
            }
            FeedError::App(e) if e.kind() == ErrorKind::Forbidden => {
                tracing::warn!(error = %e, "Feed permission denied");
            }
            _ => {
                tracing::debug!(error = %self, "Feed error");
            }
        }
    }
}

impl IntoResponse for FeedError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}
