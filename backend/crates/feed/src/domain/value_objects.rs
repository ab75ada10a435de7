//! Domain Value Objects

use kernel::error::app_error::{AppError, AppResult};
use kernel::error::field_errors::messages;
use std::fmt;

/// Maximum status length (column limit)
pub const STATUS_TEXT_MAX_LENGTH: usize = 255;

/// Status text - trimmed, non-blank, at most 255 characters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusText(String);

impl StatusText {
    pub fn new(text: impl Into<String>) -> AppResult<Self> {
        let text = text.into();
        let text = text.trim();

        if text.is_empty() {
            return Err(AppError::bad_request(messages::BLANK));
        }

        if text.chars().count() > STATUS_TEXT_MAX_LENGTH {
            return Err(AppError::bad_request(messages::max_length(
                STATUS_TEXT_MAX_LENGTH,
            )));
        }

        Ok(Self(text.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatusText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
