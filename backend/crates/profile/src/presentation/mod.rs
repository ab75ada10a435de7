//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::ProfileAppState;
pub use middleware::{TokenAuthState, authenticate_token};
pub use router::profile_router_generic;
