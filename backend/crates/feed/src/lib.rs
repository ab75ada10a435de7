//! Feed Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Feed item entity, status text, ownership permission, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Access Model
//! - Every endpoint requires an authenticated principal (see the profile
//!   crate's token middleware)
//! - The owner of a new item is always the requester; any owner sent in
//!   the body is ignored
//! - Only the owner may update or delete an item

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{FeedError, FeedResult};
pub use infra::{memory::InMemoryFeedRepository, postgres::PgFeedRepository};
pub use presentation::router::feed_router_generic;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
