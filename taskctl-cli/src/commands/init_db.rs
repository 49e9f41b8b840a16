//! Standalone schema initialization

use anyhow::{Context, Result};
use clap::Parser;
use taskctl_server::db::{create_pool, init_schema};

use super::database::DatabaseArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Create the tasks table if absent
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = args.database.into_config()?;
    tracing::info!("Initializing schema on {}", config.describe());

    let pool = create_pool(&config)
        .await
        .context("Failed to create database pool")?;
    init_schema(&pool)
        .await
        .context("Failed to initialize schema")?;
    pool.close().await;

    println!("Schema ready on {}", config.describe());
    Ok(())
}
