//! User Profile Entity
//!
//! The account record. The email is the login identifier.

use chrono::{DateTime, Utc};
use kernel::id::UserProfileId;
use kernel::principal::AuthenticatedUser;
use std::fmt;

use crate::domain::value_object::{
    email::Email, profile_name::ProfileName, user_password::UserPassword,
};

/// Persisted user profile
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: UserProfileId,
    pub email: Email,
    pub name: ProfileName,
    pub password: UserPassword,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn full_name(&self) -> &str {
        self.name.as_str()
    }

    pub fn short_name(&self) -> &str {
        self.name.as_str()
    }

    /// Inactive profiles can neither obtain nor use tokens
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Request identity for this profile
    pub fn to_principal(&self) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: self.id,
            email: self.email.as_str().to_string(),
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
        }
    }

    /// Apply validated changes and bump `updated_at`
    pub fn apply(&mut self, changes: ProfileChanges) {
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(password) = changes.password {
            self.password = password;
        }
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.email)
    }
}

/// Profile that has not been stored yet (no id)
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    pub email: Email,
    pub name: ProfileName,
    pub password: UserPassword,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl NewUserProfile {
    pub fn new(email: Email, name: ProfileName, password: UserPassword) -> Self {
        Self {
            email,
            name,
            password,
            is_staff: false,
            is_superuser: false,
            created_at: Utc::now(),
        }
    }

    /// Grant staff and superuser flags
    pub fn superuser(mut self) -> Self {
        self.is_staff = true;
        self.is_superuser = true;
        self
    }

    /// Attach the store-assigned id
    pub fn into_profile(self, id: UserProfileId) -> UserProfile {
        UserProfile {
            id,
            email: self.email,
            name: self.name,
            password: self.password,
            is_active: true,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Validated subset of fields to change
#[derive(Debug, Default)]
pub struct ProfileChanges {
    pub email: Option<Email>,
    pub name: Option<ProfileName>,
    pub password: Option<UserPassword>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn new_profile() -> NewUserProfile {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        NewUserProfile::new(
            Email::new("ada@example.com").unwrap(),
            ProfileName::new("Ada").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[test]
    fn test_new_profile_defaults() {
        let profile = new_profile().into_profile(UserProfileId::from_i64(3));
        assert!(profile.is_active);
        assert!(profile.can_login());
        assert!(!profile.is_staff);
        assert!(!profile.is_superuser);
        assert_eq!(profile.full_name(), "Ada");
        assert_eq!(profile.short_name(), "Ada");
        assert_eq!(profile.to_string(), "ada@example.com");
    }

    #[test]
    fn test_superuser_flags() {
        let profile = new_profile().superuser().into_profile(UserProfileId::from_i64(1));
        let principal = profile.to_principal();
        assert!(principal.is_staff);
        assert!(principal.is_superuser);
        assert_eq!(principal.user_id, UserProfileId::from_i64(1));
    }

    #[test]
    fn test_apply_partial_changes() {
        let mut profile = new_profile().into_profile(UserProfileId::from_i64(1));
        let before = profile.updated_at;

        profile.apply(ProfileChanges {
            name: Some(ProfileName::new("Ada L.").unwrap()),
            ..Default::default()
        });

        assert_eq!(profile.name.as_str(), "Ada L.");
        assert_eq!(profile.email.as_str(), "ada@example.com");
        assert!(profile.updated_at >= before);
    }
}
