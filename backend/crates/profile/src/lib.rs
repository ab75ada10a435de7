//! Profile Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, permissions, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, token middleware
//!
//! ## Features
//! - Profile registration, listing with search, retrieval
//! - Owner-only update and deletion
//! - Token issuance (`POST /login/`) and `Authorization: Token <key>` authentication
//! - Superuser creation for the management CLI
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optionally peppered
//! - One opaque 40-hex-character token per profile, revoked with the profile
//! - Inactive profiles can neither obtain nor use tokens

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ProfileConfig;
pub use error::{ProfileError, ProfileResult};
pub use infra::{memory::InMemoryProfileRepository, postgres::PgProfileRepository};
pub use presentation::middleware::{TokenAuthState, authenticate_token};
pub use presentation::router::profile_router_generic;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
