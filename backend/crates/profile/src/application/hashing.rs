//! Password hashing off the async runtime
//!
//! Argon2id is CPU-bound; hashing and verification run on the blocking pool.

use std::sync::Arc;

use crate::application::config::ProfileConfig;
use crate::domain::value_object::user_password::{RawPassword, UserPassword};
use crate::error::ProfileResult;

pub async fn hash_password(raw: RawPassword, config: &Arc<ProfileConfig>) -> ProfileResult<UserPassword> {
    let config = Arc::clone(config);
    let hashed = tokio::task::spawn_blocking(move || UserPassword::from_raw(&raw, config.pepper()))
        .await??;
    Ok(hashed)
}

/// Outcome of checking a login attempt
#[derive(Debug)]
pub enum Verification {
    Invalid,
    Valid,
    /// Correct password stored with outdated parameters, rehashed
    Upgraded(UserPassword),
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        !matches!(self, Verification::Invalid)
    }
}

pub async fn verify_password(
    hash: UserPassword,
    raw: RawPassword,
    config: &Arc<ProfileConfig>,
) -> ProfileResult<Verification> {
    let config = Arc::clone(config);
    let verification = tokio::task::spawn_blocking(move || {
        if !hash.verify(&raw, config.pepper()) {
            return Ok(Verification::Invalid);
        }
        if hash.needs_rehash() {
            return UserPassword::from_raw(&raw, config.pepper()).map(Verification::Upgraded);
        }
        Ok(Verification::Valid)
    })
    .await??;
    Ok(verification)
}
