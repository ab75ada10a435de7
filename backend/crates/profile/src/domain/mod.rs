//! Domain Layer
//!
//! Contains entities, value objects, permissions and repository traits.

pub mod entity;
pub mod permission;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{auth_token::AuthToken, user_profile::UserProfile};
pub use permission::UpdateOwnProfile;
pub use repository::{AuthTokenRepository, UserProfileRepository};
