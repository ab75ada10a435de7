//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::UserProfileId;

use crate::domain::entity::{
    auth_token::AuthToken,
    user_profile::{NewUserProfile, UserProfile},
};
use crate::domain::value_object::email::Email;
use crate::error::ProfileResult;

/// User profile repository trait
#[trait_variant::make(UserProfileRepository: Send)]
pub trait LocalUserProfileRepository {
    /// Store a new profile and return it with its assigned id
    ///
    /// Fails with `ProfileError::EmailTaken` when the email is registered.
    async fn create(&self, profile: &NewUserProfile) -> ProfileResult<UserProfile>;

    /// Find profile by ID
    async fn find_by_id(&self, id: UserProfileId) -> ProfileResult<Option<UserProfile>>;

    /// Find profile by email
    async fn find_by_email(&self, email: &Email) -> ProfileResult<Option<UserProfile>>;

    /// Check whether an email is registered, optionally ignoring one profile
    async fn exists_by_email(
        &self,
        email: &Email,
        exclude: Option<UserProfileId>,
    ) -> ProfileResult<bool>;

    /// All profiles ordered by id, filtered by search terms
    ///
    /// Every term must appear (case-insensitively) in the name or the email.
    async fn list(&self, search_terms: &[String]) -> ProfileResult<Vec<UserProfile>>;

    /// Update profile
    async fn update(&self, profile: &UserProfile) -> ProfileResult<()>;

    /// Delete profile together with its token; `false` when absent
    async fn delete(&self, id: UserProfileId) -> ProfileResult<bool>;
}

/// Auth token repository trait
#[trait_variant::make(AuthTokenRepository: Send)]
pub trait LocalAuthTokenRepository {
    /// Find token by key
    async fn find_by_key(&self, key: &str) -> ProfileResult<Option<AuthToken>>;

    /// Find the token of a profile
    async fn find_by_user_id(&self, user_id: UserProfileId) -> ProfileResult<Option<AuthToken>>;

    /// Store `token` unless the profile already has one; returns the stored token
    async fn insert_or_existing(&self, token: &AuthToken) -> ProfileResult<AuthToken>;
}
