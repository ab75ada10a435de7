//! Obtain Token Use Case
//!
//! Exchanges an email/password pair for the profile's token, creating the
//! token on first login.

use std::sync::Arc;

use kernel::error::app_error::{AppError, AppResult};
use kernel::error::field_errors::{FieldErrors, messages};

use crate::application::config::ProfileConfig;
use crate::application::hashing::{Verification, hash_password, verify_password};
use crate::domain::entity::{
    auth_token::AuthToken,
    user_profile::{ProfileChanges, UserProfile},
};
use crate::domain::repository::{AuthTokenRepository, UserProfileRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{ProfileError, ProfileResult};

/// Obtain token input; `username` carries the email
#[derive(Debug, Default)]
pub struct ObtainTokenInput {
    pub username: Option<String>,
    pub password: Option<String>,
}

pub struct ObtainTokenUseCase<R>
where
    R: UserProfileRepository + AuthTokenRepository,
{
    repo: Arc<R>,
    config: Arc<ProfileConfig>,
}

impl<R> ObtainTokenUseCase<R>
where
    R: UserProfileRepository + AuthTokenRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ProfileConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: ObtainTokenInput) -> ProfileResult<AuthToken> {
        let mut errors = FieldErrors::new();
        let username = errors.required("username", input.username, |raw| {
            not_blank(raw.trim().to_string())
        });
        let password = errors.required("password", input.password, not_blank);

        let (Some(username), Some(password)) = (username, password) else {
            return Err(ProfileError::Validation(errors));
        };

        let profile = self.authenticate(username, password).await?;

        let token = self.get_or_create_token(&profile).await?;

        tracing::info!(user_id = %profile.id, "Token issued");

        Ok(token)
    }

    async fn authenticate(&self, username: String, password: String) -> ProfileResult<UserProfile> {
        let attempt = RawPassword::for_verification(password);

        let profile = match Email::new(username) {
            Ok(email) => self.repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(mut profile) = profile else {
            // Unknown emails take as long as wrong passwords
            let _ = hash_password(attempt, &self.config).await;
            return Err(ProfileError::InvalidCredentials);
        };

        let verification = verify_password(profile.password.clone(), attempt, &self.config).await?;
        if !verification.is_valid() || !profile.can_login() {
            return Err(ProfileError::InvalidCredentials);
        }

        if let Verification::Upgraded(password) = verification {
            profile.apply(ProfileChanges {
                password: Some(password),
                ..Default::default()
            });
            self.repo.update(&profile).await?;
            tracing::debug!(user_id = %profile.id, "Password hash upgraded");
        }

        Ok(profile)
    }

    async fn get_or_create_token(&self, profile: &UserProfile) -> ProfileResult<AuthToken> {
        if let Some(token) = self.repo.find_by_user_id(profile.id).await? {
            return Ok(token);
        }
        self.repo
            .insert_or_existing(&AuthToken::generate(profile.id))
            .await
    }
}

fn not_blank(raw: String) -> AppResult<String> {
    if raw.is_empty() {
        Err(AppError::bad_request(messages::BLANK))
    } else {
        Ok(raw)
    }
}
