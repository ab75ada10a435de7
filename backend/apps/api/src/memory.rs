//! In-memory stores for running without a database.
//!
//! Postgres removes a profile's feed items through the foreign key cascade;
//! [`CascadingProfileRepository`] does the same for the in-memory stores.

use feed::InMemoryFeedRepository;
use kernel::id::UserProfileId;
use profile::InMemoryProfileRepository;
use profile::domain::entity::{
    auth_token::AuthToken,
    user_profile::{NewUserProfile, UserProfile},
};
use profile::domain::repository::{AuthTokenRepository, UserProfileRepository};
use profile::domain::value_object::email::Email;
use profile::error::ProfileResult;

#[derive(Clone, Default)]
pub struct CascadingProfileRepository {
    profiles: InMemoryProfileRepository,
    feed: InMemoryFeedRepository,
}

impl CascadingProfileRepository {
    pub fn new(profiles: InMemoryProfileRepository, feed: InMemoryFeedRepository) -> Self {
        Self { profiles, feed }
    }
}

impl UserProfileRepository for CascadingProfileRepository {
    async fn create(&self, profile: &NewUserProfile) -> ProfileResult<UserProfile> {
        self.profiles.create(profile).await
    }

    async fn find_by_id(&self, id: UserProfileId) -> ProfileResult<Option<UserProfile>> {
        self.profiles.find_by_id(id).await
    }

    async fn find_by_email(&self, email: &Email) -> ProfileResult<Option<UserProfile>> {
        self.profiles.find_by_email(email).await
    }

    async fn exists_by_email(
        &self,
        email: &Email,
        exclude: Option<UserProfileId>,
    ) -> ProfileResult<bool> {
        self.profiles.exists_by_email(email, exclude).await
    }

    async fn list(&self, search_terms: &[String]) -> ProfileResult<Vec<UserProfile>> {
        self.profiles.list(search_terms).await
    }

    async fn update(&self, profile: &UserProfile) -> ProfileResult<()> {
        self.profiles.update(profile).await
    }

    async fn delete(&self, id: UserProfileId) -> ProfileResult<bool> {
        let removed = self.profiles.delete(id).await?;
        if removed {
            let items = self.feed.delete_by_owner(id).await;
            tracing::debug!(user_id = %id, items, "Removed feed items of deleted profile");
        }
        Ok(removed)
    }
}

impl AuthTokenRepository for CascadingProfileRepository {
    async fn find_by_key(&self, key: &str) -> ProfileResult<Option<AuthToken>> {
        self.profiles.find_by_key(key).await
    }

    async fn find_by_user_id(&self, user_id: UserProfileId) -> ProfileResult<Option<AuthToken>> {
        self.profiles.find_by_user_id(user_id).await
    }

    async fn insert_or_existing(&self, token: &AuthToken) -> ProfileResult<AuthToken> {
        self.profiles.insert_or_existing(token).await
    }
}
