//! taskctl CLI - task store server and ops tooling
//!
//! Entry point for the `taskctl` binary:
//! - Task API server (`serve`)
//! - Schema initialization (`init-db`)
//! - Pod CPU/memory lookup against Prometheus (`pod-usage`)

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Env files read at startup, in order. Earlier files and the real
/// environment win.
const ENV_FILES: [&str; 2] = [".env.deployment", ".env"];

#[derive(Parser, Debug)]
#[command(
    name = "taskctl",
    author,
    version,
    about = "Task tracking API over PostgreSQL, plus pod usage lookups"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the task HTTP API (initializes the schema first)
    Serve(commands::serve::ServeArgs),
    /// Create the tasks table if it does not exist, then exit
    InitDb(commands::init_db::InitDbArgs),
    /// Print CPU and memory usage for a pod from Prometheus
    PodUsage(taskctl_metrics::PodUsageArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
}

/// Load env files from the working directory without overriding
/// variables that are already set.
///
/// Runs before tracing is installed so `RUST_LOG` can come from these
/// files; outcomes are returned for [`log_env_files`].
fn load_env_files() -> Vec<(&'static str, dotenvy::Result<PathBuf>)> {
    ENV_FILES
        .into_iter()
        .map(|file| (file, dotenvy::from_filename(file)))
        .collect()
}

fn log_env_files(loaded: Vec<(&'static str, dotenvy::Result<PathBuf>)>) {
    for (file, result) in loaded {
        match result {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring {}: {}", file, e),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let loaded = load_env_files();
    init_tracing().ok();
    log_env_files(loaded);
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::InitDb(args) => commands::run_init_db(args).await?,
        Commands::PodUsage(args) => taskctl_metrics::run_pod_usage(args).await?,
    }

    Ok(())
}
