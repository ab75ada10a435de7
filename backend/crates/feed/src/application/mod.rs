//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Every use case expects an authenticated principal.

pub mod manage_feed;
pub mod post_status;

pub use manage_feed::ManageFeedUseCase;
pub use post_status::PostStatusUseCase;
