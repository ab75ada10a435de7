//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate_token;
pub mod config;
pub mod create_user;
pub mod hashing;
pub mod manage_profile;
pub mod obtain_token;

// Re-exports
pub use authenticate_token::AuthenticateTokenUseCase;
pub use config::ProfileConfig;
pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use manage_profile::{ManageProfileUseCase, UpdateProfileInput, search_terms};
pub use obtain_token::{ObtainTokenInput, ObtainTokenUseCase};
