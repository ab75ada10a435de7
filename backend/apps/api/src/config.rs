//! Server configuration read from the environment (after `.env` is loaded).

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use axum::http::HeaderValue;
use base64::Engine;
use base64::engine::general_purpose;
use profile::ProfileConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Without it the server keeps everything in memory
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    pub password_pepper: Option<Vec<u8>>,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 0.0.0.0:8000")?;

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        let password_pepper = match env::var("PASSWORD_PEPPER") {
            Ok(encoded) if !encoded.trim().is_empty() => Some(
                general_purpose::STANDARD
                    .decode(encoded.trim())
                    .context("PASSWORD_PEPPER must be base64")?,
            ),
            _ => None,
        };

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
            frontend_origins,
            password_pepper,
        })
    }

    pub fn profile_config(&self) -> ProfileConfig {
        match &self.password_pepper {
            Some(pepper) => ProfileConfig::with_pepper(pepper.clone()),
            None => ProfileConfig::default(),
        }
    }
}

/// Comma-separated list; entries that are not valid header values are skipped
fn parse_origins(raw: &str) -> Vec<HeaderValue> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect()
}
