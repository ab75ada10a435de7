//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::{auth_token::AuthToken, user_profile::UserProfile};

/// Query string for GET /api/profile/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileListQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// Body of POST /api/profile/ and PUT/PATCH /api/profile/{id}/
///
/// Every field is optional here; presence rules depend on the operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Profile representation (the password is write-only)
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub email: String,
    pub name: String,
}

impl From<&UserProfile> for ProfileResponse {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.as_i64(),
            email: profile.email.as_str().to_string(),
            name: profile.name.as_str().to_string(),
        }
    }
}

/// Body of POST /api/login/
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Response for POST /api/login/
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

impl From<AuthToken> for TokenResponse {
    fn from(token: AuthToken) -> Self {
        Self { token: token.key }
    }
}
