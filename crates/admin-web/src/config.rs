//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Admin web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// SQLite database URL.
    pub database_url: String,
    /// Rows shown on the links page and the default for `/api/files`.
    pub links_page_size: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `ADMIN_ADDR` | Server bind address | `127.0.0.1:8788` |
    /// | `DATABASE_URL` | SQLite database URL | `sqlite:filedrop.db?mode=rwc` |
    /// | `LINKS_PAGE_SIZE` | Rows in the link listing | `200` |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let addr = lookup("ADMIN_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8788".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite:filedrop.db?mode=rwc".to_string());

        let links_page_size = match lookup("LINKS_PAGE_SIZE") {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidPageSize(raw)),
            },
            None => database::file::DEFAULT_LIST_LIMIT,
        };

        Ok(Self {
            addr,
            database_url,
            links_page_size,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid ADMIN_ADDR format")]
    InvalidAddr,

    #[error("LINKS_PAGE_SIZE must be a positive integer, got {0:?}")]
    InvalidPageSize(String),
}
