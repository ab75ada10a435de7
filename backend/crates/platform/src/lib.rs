//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, token keys, constant-time compare)
//! - Password hashing (Argon2id, NIST SP 800-63B length rules)
//! - `Authorization` header parsing for token authentication

pub mod authorization;
pub mod crypto;
pub mod password;
