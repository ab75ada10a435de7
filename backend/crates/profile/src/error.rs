//! Profile Error Types
//!
//! This module provides profile-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    field_errors::{FieldErrors, NON_FIELD_ERRORS},
    kind::ErrorKind,
};
use platform::authorization::TokenHeaderError;
use thiserror::Error;

pub const EMAIL_TAKEN: &str = "user profile with this email already exists.";
pub const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";

/// Profile-specific result type alias
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Profile-specific error variants
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Profile does not exist
    #[error("Not found.")]
    NotFound,

    /// One or more request fields failed validation
    #[error("Invalid input.")]
    Validation(FieldErrors),

    /// Email already registered
    #[error("user profile with this email already exists.")]
    EmailTaken,

    /// Wrong email/password pair, or inactive profile
    #[error("Unable to log in with provided credentials.")]
    InvalidCredentials,

    /// Unknown token key
    #[error("Invalid token.")]
    InvalidToken,

    /// `Authorization: Token` header is malformed
    #[error(transparent)]
    InvalidTokenHeader(#[from] TokenHeaderError),

    /// Token belongs to an inactive profile
    #[error("User inactive or deleted.")]
    UserInactive,

    /// Already classified (permission checks, value objects)
    #[error(transparent)]
    App(#[from] AppError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProfileError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProfileError::NotFound => ErrorKind::NotFound,
            ProfileError::Validation(_)
            | ProfileError::EmailTaken
            | ProfileError::InvalidCredentials => ErrorKind::BadRequest,
            ProfileError::InvalidToken
            | ProfileError::InvalidTokenHeader(_)
            | ProfileError::UserInactive => ErrorKind::Unauthorized,
            ProfileError::App(e) => e.kind(),
            ProfileError::Database(_) | ProfileError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            ProfileError::NotFound => AppError::not_found("Not found."),
            ProfileError::Validation(errors) => AppError::validation(errors),
            ProfileError::EmailTaken => {
                AppError::validation(FieldErrors::single("email", EMAIL_TAKEN))
            }
            ProfileError::InvalidCredentials => {
                AppError::validation(FieldErrors::single(NON_FIELD_ERRORS, INVALID_CREDENTIALS))
            }
            ProfileError::App(e) => e,
            ProfileError::Database(e) => AppError::from(e),
            ProfileError::Internal(_) => AppError::internal("Internal server error."),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ProfileError::Database(e) => {
                tracing::error!(error = %e, "Profile database error");
            }
            ProfileError::Internal(msg) => {
                tracing::error!(message = %msg, "Profile internal error");
            }
            ProfileError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            ProfileError::InvalidToken | ProfileError::UserInactive => {
                tracing::warn!(error = %self, "Token authentication failed");
            }
            ProfileError::App(e) if e.is_server_error() => {
                tracing::error!(error = %e, "Profile error");
            }
            _ => {
                tracing::debug!(error = %self, "Profile error");
            }
        }
    }
}

impl IntoResponse for ProfileError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for ProfileError {
    fn from(err: tokio::task::JoinError) -> Self {
        ProfileError::Internal(format!("Blocking task failed: {err}"))
    }
}
