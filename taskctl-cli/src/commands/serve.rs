//! HTTP server command for the task API

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use taskctl_server::ServerConfig;

use super::database::DatabaseArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TASKCTL_BIND", default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = args.database.into_config()?;

    tracing::info!("Starting taskctl server on {}", args.bind);

    let server_config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    // Connects, initializes the schema, then blocks until shutdown
    taskctl_server::serve(db_config, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
