//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (FeedItem)
//! - Domain value objects (StatusText)
//! - Ownership permission (UpdateOwnStatus)
//! - Repository traits (interfaces)

pub mod entities;
pub mod permission;
pub mod repository;
pub mod value_objects;
