//! Infrastructure Layer
//!
//! Repository implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProfileRepository;
pub use postgres::PgProfileRepository;
