//! Email Value Object
//!
//! Represents a validated, normalized email address. The domain part is
//! lower-cased; the local part keeps its case because mail servers may
//! treat it as significant.

use kernel::error::app_error::{AppError, AppResult};
use kernel::error::field_errors::messages;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum email length (column limit)
pub const EMAIL_MAX_LENGTH: usize = 255;

/// Maximum local part length (per RFC 5321)
const LOCAL_PART_MAX_LENGTH: usize = 64;

/// Email address value object
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into();
        let email = email.trim();

        if email.is_empty() {
            return Err(AppError::bad_request(messages::BLANK));
        }

        if email.chars().count() > EMAIL_MAX_LENGTH {
            return Err(AppError::bad_request(messages::max_length(EMAIL_MAX_LENGTH)));
        }

        let Some((local, domain)) = email.rsplit_once('@') else {
            return Err(AppError::bad_request(messages::INVALID_EMAIL));
        };

        if !Self::is_valid_local_part(local) || !Self::is_valid_domain(domain) {
            return Err(AppError::bad_request(messages::INVALID_EMAIL));
        }

        Ok(Self(format!("{}@{}", local, domain.to_lowercase())))
    }

    fn is_valid_local_part(local: &str) -> bool {
        !local.is_empty()
            && local.len() <= LOCAL_PART_MAX_LENGTH
            && !local.starts_with('.')
            && !local.ends_with('.')
            && !local.contains("..")
            && local
                .chars()
                .all(|c| c.is_ascii_graphic() && !"@\"(),:;<>[\\]".contains(c))
    }

    fn is_valid_domain(domain: &str) -> bool {
        if domain.eq_ignore_ascii_case("localhost") {
            return true;
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.len() < 2 {
            return false;
        }

        labels.iter().all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_alphanumeric() || c == '-')
        })
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.0.rsplit_once('@').map(|(_, d)| d).unwrap_or("")
    }

    /// Get the local part of the email
    pub fn local_part(&self) -> &str {
        self.0.rsplit_once('@').map(|(l, _)| l).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
