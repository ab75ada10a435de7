//! Request Principal
//!
//! The identity attached to a request once its credentials have been
//! checked. Resources read it from request extensions; its absence means
//! the request is anonymous.

use crate::id::UserProfileId;

/// Authorization scheme keyword: `Authorization: Token <key>`
pub const TOKEN_KEYWORD: &str = "Token";

/// Authenticated requester
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserProfileId,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AuthenticatedUser {
    /// True when this principal owns a record belonging to `owner`
    pub fn owns(&self, owner: UserProfileId) -> bool {
        self.user_id == owner
    }
}
