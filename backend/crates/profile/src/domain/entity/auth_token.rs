//! Auth Token Entity
//!
//! One opaque key per profile, sent as `Authorization: Token <key>`.

use chrono::{DateTime, Utc};
use kernel::id::UserProfileId;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub key: String,
    pub user_id: UserProfileId,
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    /// Fresh token with a random 40-hex-character key
    pub fn generate(user_id: UserProfileId) -> Self {
        Self {
            key: platform::crypto::generate_token_key(),
            user_id,
            created_at: Utc::now(),
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("key", &"[REDACTED]")
            .field("user_id", &self.user_id)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate() {
        let a = AuthToken::generate(UserProfileId::from_i64(1));
        let b = AuthToken::generate(UserProfileId::from_i64(1));

        assert_eq!(a.key.len(), 40);
        assert!(a.key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(a.key, b.key);
    }

    #[test]
    fn test_debug_hides_key() {
        let token = AuthToken::generate(UserProfileId::from_i64(1));
        assert!(!format!("{:?}", token).contains(&token.key));
    }
}
