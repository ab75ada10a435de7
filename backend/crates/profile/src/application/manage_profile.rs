//! Manage Profile Use Case
//!
//! Listing, retrieval, update and deletion of profiles. Mutations are
//! guarded by [`UpdateOwnProfile`] after the record is loaded.

use std::sync::Arc;

use http::Method;
use kernel::error::field_errors::FieldErrors;
use kernel::id::UserProfileId;
use kernel::permission::check_object_permission;
use kernel::principal::AuthenticatedUser;

use crate::application::config::ProfileConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::user_profile::{ProfileChanges, UserProfile};
use crate::domain::permission::UpdateOwnProfile;
use crate::domain::repository::UserProfileRepository;
use crate::domain::value_object::{
    email::Email, profile_name::ProfileName, user_password::RawPassword,
};
use crate::error::{EMAIL_TAKEN, ProfileError, ProfileResult};

/// Split a search query into terms
///
/// Terms are separated by whitespace and/or commas; NUL characters are
/// dropped.
pub fn search_terms(query: &str) -> Vec<String> {
    query
        .replace('\0', "")
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Update profile input (`None` means the field was omitted)
#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

pub struct ManageProfileUseCase<R>
where
    R: UserProfileRepository,
{
    repo: Arc<R>,
    config: Arc<ProfileConfig>,
}

impl<R> ManageProfileUseCase<R>
where
    R: UserProfileRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ProfileConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn list(&self, search: Option<&str>) -> ProfileResult<Vec<UserProfile>> {
        let terms = search.map(search_terms).unwrap_or_default();
        self.repo.list(&terms).await
    }

    pub async fn retrieve(&self, id: UserProfileId) -> ProfileResult<UserProfile> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ProfileError::NotFound)
    }

    /// Load a profile and check that `user` may apply `method` to it
    pub async fn authorize(
        &self,
        id: UserProfileId,
        method: &Method,
        user: Option<&AuthenticatedUser>,
    ) -> ProfileResult<UserProfile> {
        let profile = self.retrieve(id).await?;
        check_object_permission(&UpdateOwnProfile, method, user, &profile)?;
        Ok(profile)
    }

    /// Replace (`partial == false`) or patch a profile
    ///
    /// A full update requires every field; a partial one accepts any subset.
    pub async fn update(
        &self,
        id: UserProfileId,
        method: &Method,
        user: Option<&AuthenticatedUser>,
        input: UpdateProfileInput,
        partial: bool,
    ) -> ProfileResult<UserProfile> {
        let mut profile = self.authorize(id, method, user).await?;

        let mut errors = FieldErrors::new();
        let (email, name, password) = if partial {
            (
                errors.optional("email", input.email, Email::new),
                errors.optional("name", input.name, ProfileName::new),
                errors.optional("password", input.password, RawPassword::new),
            )
        } else {
            (
                errors.required("email", input.email, Email::new),
                errors.required("name", input.name, ProfileName::new),
                errors.required("password", input.password, RawPassword::new),
            )
        };

        if let Some(email) = &email
            && self.repo.exists_by_email(email, Some(profile.id)).await?
        {
            errors.add("email", EMAIL_TAKEN);
        }

        if !errors.is_empty() {
            return Err(ProfileError::Validation(errors));
        }

        let password = match password {
            Some(raw) => Some(hash_password(raw, &self.config).await?),
            None => None,
        };

        profile.apply(ProfileChanges {
            email,
            name,
            password,
        });
        self.repo.update(&profile).await?;

        tracing::info!(user_id = %profile.id, partial, "User profile updated");

        Ok(profile)
    }

    pub async fn destroy(
        &self,
        id: UserProfileId,
        method: &Method,
        user: Option<&AuthenticatedUser>,
    ) -> ProfileResult<()> {
        let profile = self.authorize(id, method, user).await?;

        if !self.repo.delete(profile.id).await? {
            return Err(ProfileError::NotFound);
        }

        tracing::info!(user_id = %profile.id, "User profile deleted");

        Ok(())
    }
}
