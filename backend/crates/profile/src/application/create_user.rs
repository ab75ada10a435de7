//! Create User Use Case
//!
//! Registers a new profile. Also used by the `createsuperuser` command.

use std::sync::Arc;

use kernel::error::field_errors::FieldErrors;

use crate::application::config::ProfileConfig;
use crate::application::hashing::hash_password;
use crate::domain::entity::user_profile::{NewUserProfile, UserProfile};
use crate::domain::repository::UserProfileRepository;
use crate::domain::value_object::{
    email::Email, profile_name::ProfileName, user_password::RawPassword,
};
use crate::error::{EMAIL_TAKEN, ProfileError, ProfileResult};

/// Create user input (`None` means the field was omitted)
#[derive(Debug, Default)]
pub struct CreateUserInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Create user use case
pub struct CreateUserUseCase<R>
where
    R: UserProfileRepository,
{
    repo: Arc<R>,
    config: Arc<ProfileConfig>,
}

impl<R> CreateUserUseCase<R>
where
    R: UserProfileRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<ProfileConfig>) -> Self {
        Self { repo, config }
    }

    /// Register a regular profile
    pub async fn execute(&self, input: CreateUserInput) -> ProfileResult<UserProfile> {
        let new_profile = self.validate(input).await?;
        self.store(new_profile).await
    }

    /// Register a profile with staff and superuser flags
    pub async fn execute_superuser(&self, input: CreateUserInput) -> ProfileResult<UserProfile> {
        let new_profile = self.validate(input).await?.superuser();
        self.store(new_profile).await
    }

    async fn validate(&self, input: CreateUserInput) -> ProfileResult<NewUserProfile> {
        let mut errors = FieldErrors::new();

        let email = errors.required("email", input.email, Email::new);
        let name = errors.required("name", input.name, ProfileName::new);
        let password = errors.required("password", input.password, RawPassword::new);

        if let Some(email) = &email
            && self.repo.exists_by_email(email, None).await?
        {
            errors.add("email", EMAIL_TAKEN);
        }

        match (email, name, password) {
            (Some(email), Some(name), Some(password)) if errors.is_empty() => {
                let password = hash_password(password, &self.config).await?;
                Ok(NewUserProfile::new(email, name, password))
            }
            _ => Err(ProfileError::Validation(errors)),
        }
    }

    async fn store(&self, new_profile: NewUserProfile) -> ProfileResult<UserProfile> {
        let profile = self.repo.create(&new_profile).await?;

        tracing::info!(
            user_id = %profile.id,
            email = %profile.email,
            is_superuser = profile.is_superuser,
            "User profile created"
        );

        Ok(profile)
    }
}
