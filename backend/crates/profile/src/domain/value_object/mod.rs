//! Value Object Module

pub mod email;
pub mod profile_name;
pub mod user_password;
