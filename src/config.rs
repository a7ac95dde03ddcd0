use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::auth::password::DEFAULT_ITERATIONS;
use crate::auth::session::DEFAULT_SESSION_TTL;

#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means the in-memory store.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub require_login: bool,
    pub pbkdf2_iterations: u32,
    pub session_ttl: Duration,
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{key}: expected a boolean, got {other:?}"),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw.trim().parse().context("DB_MAX_CONNECTIONS must be a positive integer")?,
            None => 5,
        };

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3050".to_string())
            .parse()
            .context("BIND_ADDR must be host:port")?;

        let model_path = lookup("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("model/severity_model.json"));

        let require_login = match lookup("REQUIRE_LOGIN") {
            Some(raw) => parse_bool("REQUIRE_LOGIN", &raw)?,
            None => true,
        };

        let pbkdf2_iterations = match lookup("PBKDF2_ITERATIONS") {
            Some(raw) => raw.trim().parse().context("PBKDF2_ITERATIONS must be a positive integer")?,
            None => DEFAULT_ITERATIONS,
        };
        if pbkdf2_iterations == 0 {
            anyhow::bail!("PBKDF2_ITERATIONS must be at least 1");
        }

        let session_ttl = match lookup("SESSION_TTL_SECS") {
            Some(raw) => Duration::from_secs(
                raw.trim().parse().context("SESSION_TTL_SECS must be a whole number of seconds")?,
            ),
            None => DEFAULT_SESSION_TTL,
        };
        if session_ttl.is_zero() {
            anyhow::bail!("SESSION_TTL_SECS must be at least 1");
        }

        Ok(Config {
            database_url,
            db_max_connections,
            bind_addr,
            model_path,
            require_login,
            pbkdf2_iterations,
            session_ttl,
        })
    }
}
