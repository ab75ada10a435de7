//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Database-assigned ID types
//! - The authenticated request principal
//! - Object-level permission predicates shared by every resource
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod field_errors;
    pub mod kind;
}
pub mod id;
#[cfg(feature = "axum")]
pub mod permission;
pub mod principal;
