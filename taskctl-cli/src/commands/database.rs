//! Database connection arguments shared by `serve` and `init-db`

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use taskctl_server::config::DEFAULT_MAX_CONNECTIONS;
use taskctl_server::DatabaseConfig;

#[derive(Args, Debug)]
pub struct DatabaseArgs {
    /// Database URL (overrides the POSTGRES_* variables)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Seconds to wait for a free pooled connection
    #[arg(long, default_value = "30")]
    pub acquire_timeout_secs: u64,
}

impl DatabaseArgs {
    /// Resolve connection settings from flags, then the environment.
    pub fn into_config(self) -> Result<DatabaseConfig> {
        let mut config = match self.database_url.filter(|url| !url.is_empty()) {
            Some(url) => DatabaseConfig::from_url(&url),
            None => DatabaseConfig::from_env(),
        }
        .context("Database is not configured. Set --database-url, DATABASE_URL, or POSTGRES_* in .env.deployment")?;

        config.max_connections = self.max_connections.max(1);
        config.acquire_timeout = Duration::from_secs(self.acquire_timeout_secs);
        Ok(config)
    }
}
