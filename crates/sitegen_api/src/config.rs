//! Server configuration read from the environment.
//!
//! # Invariants
//! - The listening address is fixed; only storage and logging are
//!   environment-driven.
//! - Missing or blank variables fall back to defaults, never to errors.
//! - Process variables take precedence over a `.env` file.

use sitegen_core::default_log_level;
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

pub const DB_PATH_ENV: &str = "SITEGEN_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "SITEGEN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "SITEGEN_LOG_DIR";

pub const ENV_FILE: &str = ".env";
pub const DEFAULT_DB_PATH: &str = "website-generator.sqlite3";
pub const LISTEN_PORT: u16 = 3001;
pub const ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://127.0.0.1:3000"];

/// Runtime settings for the API process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// SQLite file backing the project store.
    pub db_path: PathBuf,
    pub listen_addr: SocketAddr,
    /// Browser origins allowed by CORS.
    pub allowed_origins: Vec<String>,
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` logs to stderr.
    pub log_dir: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            listen_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, LISTEN_PORT)),
            allowed_origins: ALLOWED_ORIGINS.iter().map(|o| (*o).to_string()).collect(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration from the process environment, filling gaps from
    /// the `KEY=value` pairs in `env_file`.
    ///
    /// # Errors
    /// - `env_file` is missing (check `dotenvy::Error::not_found`) or malformed.
    pub fn from_env_file(env_file: &Path) -> Result<Self, dotenvy::Error> {
        let mut file_vars = HashMap::new();
        for item in dotenvy::from_path_iter(env_file)? {
            let (key, value) = item?;
            file_vars.insert(key, value);
        }
        Ok(Self::from_lookup(|key| {
            std::env::var(key)
                .ok()
                .or_else(|| file_vars.get(key).cloned())
        }))
    }

    /// Reads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level;
        }
        config.log_dir = read(LOG_DIR_ENV);
        config
    }
}
