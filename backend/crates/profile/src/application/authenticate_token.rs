//! Authenticate Token Use Case
//!
//! Resolves a token key to the principal of its (active) profile.

use std::sync::Arc;

use kernel::principal::AuthenticatedUser;

use crate::domain::repository::{AuthTokenRepository, UserProfileRepository};
use crate::error::{ProfileError, ProfileResult};

pub struct AuthenticateTokenUseCase<R>
where
    R: UserProfileRepository + AuthTokenRepository,
{
    repo: Arc<R>,
}

impl<R> AuthenticateTokenUseCase<R>
where
    R: UserProfileRepository + AuthTokenRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, key: &str) -> ProfileResult<AuthenticatedUser> {
        let token = self
            .repo
            .find_by_key(key)
            .await?
            .ok_or(ProfileError::InvalidToken)?;

        let profile = self
            .repo
            .find_by_id(token.user_id)
            .await?
            .ok_or(ProfileError::InvalidToken)?;

        if !profile.can_login() {
            return Err(ProfileError::UserInactive);
        }

        Ok(profile.to_principal())
    }
}
