//! Profile Name Value Object
//!
//! Display name of a profile. Free-form text, trimmed, 1-255 characters.

use kernel::error::app_error::{AppError, AppResult};
use kernel::error::field_errors::messages;
use std::fmt;

pub const PROFILE_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileName(String);

impl ProfileName {
    pub fn new(name: impl Into<String>) -> AppResult<Self> {
        let name = name.into();
        let name = name.trim();

        if name.is_empty() {
            return Err(AppError::bad_request(messages::BLANK));
        }

        if name.chars().count() > PROFILE_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(messages::max_length(
                PROFILE_NAME_MAX_LENGTH,
            )));
        }

        Ok(Self(name.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims() {
        assert_eq!(ProfileName::new("  Ada Lovelace ").unwrap().as_str(), "Ada Lovelace");
    }

    #[test]
    fn test_blank() {
        assert_eq!(ProfileName::new(" \t ").unwrap_err().message(), messages::BLANK);
    }

    #[test]
    fn test_length_counts_characters() {
        assert!(ProfileName::new("é".repeat(PROFILE_NAME_MAX_LENGTH)).is_ok());
        let err = ProfileName::new("x".repeat(PROFILE_NAME_MAX_LENGTH + 1)).unwrap_err();
        assert_eq!(err.message(), messages::max_length(PROFILE_NAME_MAX_LENGTH));
    }
}
