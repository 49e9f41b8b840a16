//! Database connection configuration
//!
//! Coordinates come from `DATABASE_URL` when set, otherwise from the
//! discrete `POSTGRES_*` variables. Read once at startup.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

/// Default maximum connections for the pool.
/// Kept low for a single small service.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 5432;

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not set (set DATABASE_URL or the POSTGRES_* variables)")]
    Missing(&'static str),

    #[error("invalid DATABASE_URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("invalid POSTGRES_PORT '{0}'")]
    InvalidPort(String),
}

/// Where and how to connect to PostgreSQL
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub connect_options: PgConnectOptions,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Build from an explicit connection URL.
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let connect_options = PgConnectOptions::from_str(url).map_err(ConfigError::InvalidUrl)?;
        Ok(Self::with_options(connect_options))
    }

    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    ///
    /// `DATABASE_URL` wins; otherwise `POSTGRES_USER` and `POSTGRES_DB` are
    /// required and host/port fall back to `localhost:5432`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(url) = var("DATABASE_URL") {
            return Self::from_url(&url);
        }

        let user = var("POSTGRES_USER").ok_or(ConfigError::Missing("POSTGRES_USER"))?;
        let database = var("POSTGRES_DB").ok_or(ConfigError::Missing("POSTGRES_DB"))?;
        let host = var("POSTGRES_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match var("POSTGRES_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        let mut options = PgConnectOptions::new()
            .host(&host)
            .port(port)
            .username(&user)
            .database(&database);
        if let Some(password) = var("POSTGRES_PASSWORD") {
            options = options.password(&password);
        }

        Ok(Self::with_options(options))
    }

    fn with_options(connect_options: PgConnectOptions) -> Self {
        Self {
            connect_options,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    /// Host, port and database for logs. Never includes credentials.
    pub fn describe(&self) -> String {
        format!(
            "{}:{}/{}",
            self.connect_options.get_host(),
            self.connect_options.get_port(),
            self.connect_options.get_database().unwrap_or("")
        )
    }
}
