//! Application Configuration
//!
//! Configuration for the Profile application layer.

use kernel::principal::TOKEN_KEYWORD;

/// Profile application configuration
#[derive(Debug, Clone)]
pub struct ProfileConfig {
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Scheme keyword expected in the `Authorization` header
    pub token_keyword: String,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            password_pepper: None,
            token_keyword: TOKEN_KEYWORD.to_string(),
        }
    }
}

impl ProfileConfig {
    pub fn with_pepper(pepper: Vec<u8>) -> Self {
        Self {
            password_pepper: Some(pepper),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
