//! In-Memory Repository
//!
//! Process-local store used by the tests and by the server when no
//! database is configured. Contents are lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::UserProfileId;
use platform::crypto::constant_time_eq;
use tokio::sync::Mutex;

use crate::domain::entity::{
    auth_token::AuthToken,
    user_profile::{NewUserProfile, UserProfile},
};
use crate::domain::repository::{AuthTokenRepository, UserProfileRepository};
use crate::domain::value_object::email::Email;
use crate::error::{ProfileError, ProfileResult};

#[derive(Default)]
struct MemoryState {
    last_id: i64,
    profiles: BTreeMap<UserProfileId, UserProfile>,
    tokens: Vec<AuthToken>,
}

/// Profile and token store behind a single lock
#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate or deactivate a profile; `false` when absent
    pub async fn set_active(&self, id: UserProfileId, is_active: bool) -> bool {
        let mut state = self.state.lock().await;
        match state.profiles.get_mut(&id) {
            Some(profile) => {
                profile.is_active = is_active;
                true
            }
            None => false,
        }
    }
}

fn matches_terms(profile: &UserProfile, terms: &[String]) -> bool {
    let name = profile.name.as_str().to_lowercase();
    let email = profile.email.as_str().to_lowercase();
    terms.iter().all(|term| {
        let term = term.to_lowercase();
        name.contains(&term) || email.contains(&term)
    })
}

// ============================================================================
// User Profile Repository Implementation
// ============================================================================

impl UserProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: &NewUserProfile) -> ProfileResult<UserProfile> {
        let mut state = self.state.lock().await;

        if state.profiles.values().any(|p| p.email == profile.email) {
            return Err(ProfileError::EmailTaken);
        }

        state.last_id += 1;
        let stored = profile
            .clone()
            .into_profile(UserProfileId::from_i64(state.last_id));
        state.profiles.insert(stored.id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, id: UserProfileId) -> ProfileResult<Option<UserProfile>> {
        Ok(self.state.lock().await.profiles.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> ProfileResult<Option<UserProfile>> {
        let state = self.state.lock().await;
        Ok(state.profiles.values().find(|p| &p.email == email).cloned())
    }

    async fn exists_by_email(
        &self,
        email: &Email,
        exclude: Option<UserProfileId>,
    ) -> ProfileResult<bool> {
        let state = self.state.lock().await;
        Ok(state
            .profiles
            .values()
            .any(|p| &p.email == email && Some(p.id) != exclude))
    }

    async fn list(&self, search_terms: &[String]) -> ProfileResult<Vec<UserProfile>> {
        let state = self.state.lock().await;
        Ok(state
            .profiles
            .values()
            .filter(|p| matches_terms(p, search_terms))
            .cloned()
            .collect())
    }

    async fn update(&self, profile: &UserProfile) -> ProfileResult<()> {
        let mut state = self.state.lock().await;

        if state
            .profiles
            .values()
            .any(|p| p.email == profile.email && p.id != profile.id)
        {
            return Err(ProfileError::EmailTaken);
        }

        match state.profiles.get_mut(&profile.id) {
            Some(stored) => {
                *stored = profile.clone();
                Ok(())
            }
            None => Err(ProfileError::NotFound),
        }
    }

    async fn delete(&self, id: UserProfileId) -> ProfileResult<bool> {
        let mut state = self.state.lock().await;
        let removed = state.profiles.remove(&id).is_some();
        state.tokens.retain(|t| t.user_id != id);
        Ok(removed)
    }
}

// ============================================================================
// Auth Token Repository Implementation
// ============================================================================

impl AuthTokenRepository for InMemoryProfileRepository {
    async fn find_by_key(&self, key: &str) -> ProfileResult<Option<AuthToken>> {
        let state = self.state.lock().await;
        Ok(state
            .tokens
            .iter()
            .find(|t| constant_time_eq(t.key.as_bytes(), key.as_bytes()))
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: UserProfileId) -> ProfileResult<Option<AuthToken>> {
        let state = self.state.lock().await;
        Ok(state.tokens.iter().find(|t| t.user_id == user_id).cloned())
    }

    async fn insert_or_existing(&self, token: &AuthToken) -> ProfileResult<AuthToken> {
        let mut state = self.state.lock().await;

        if let Some(existing) = state.tokens.iter().find(|t| t.user_id == token.user_id) {
            return Ok(existing.clone());
        }
        if !state.profiles.contains_key(&token.user_id) {
            return Err(ProfileError::NotFound);
        }

        state.tokens.push(token.clone());
        Ok(token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        profile_name::ProfileName,
        user_password::{RawPassword, UserPassword},
    };

    fn new_profile(email: &str, name: &str) -> NewUserProfile {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        NewUserProfile::new(
            Email::new(email).unwrap(),
            ProfileName::new(name).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryProfileRepository::new();
        let a = repo.create(&new_profile("a@example.com", "A")).await.unwrap();
        let b = repo.create(&new_profile("b@example.com", "B")).await.unwrap();
        assert!(a.id < b.id);

        let err = repo.create(&new_profile("a@example.com", "Again")).await.unwrap_err();
        assert!(matches!(err, ProfileError::EmailTaken));
    }

    #[tokio::test]
    async fn test_list_filters_by_every_term() {
        let repo = InMemoryProfileRepository::new();
        repo.create(&new_profile("ada@example.com", "Ada Lovelace")).await.unwrap();
        repo.create(&new_profile("alan@example.org", "Alan Turing")).await.unwrap();

        assert_eq!(repo.list(&[]).await.unwrap().len(), 2);

        let found = repo.list(&["LOVE".to_string()]).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_str(), "Ada Lovelace");

        let found = repo
            .list(&["a".to_string(), "example.org".to_string()])
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].email.as_str(), "alan@example.org");
    }

    #[tokio::test]
    async fn test_one_token_per_profile() {
        let repo = InMemoryProfileRepository::new();
        let profile = repo.create(&new_profile("a@example.com", "A")).await.unwrap();

        let first = repo
            .insert_or_existing(&AuthToken::generate(profile.id))
            .await
            .unwrap();
        let second = repo
            .insert_or_existing(&AuthToken::generate(profile.id))
            .await
            .unwrap();
        assert_eq!(first.key, second.key);

        let found = repo.find_by_key(&first.key).await.unwrap().unwrap();
        assert_eq!(found.user_id, profile.id);
    }

    #[tokio::test]
    async fn test_delete_revokes_token() {
        let repo = InMemoryProfileRepository::new();
        let profile = repo.create(&new_profile("a@example.com", "A")).await.unwrap();
        let token = repo
            .insert_or_existing(&AuthToken::generate(profile.id))
            .await
            .unwrap();

        assert!(repo.delete(profile.id).await.unwrap());
        assert!(!repo.delete(profile.id).await.unwrap());
        assert!(repo.find_by_key(&token.key).await.unwrap().is_none());
    }
}
