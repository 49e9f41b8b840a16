//! taskctl-server: task store over HTTP
//!
//! Exposes create/list/get/update/delete for a single `tasks` table in
//! PostgreSQL, with sparse (field-presence) updates.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;

pub use config::DatabaseConfig;
pub use error::{Error, Result};
pub use http::{AppState, ServerConfig};

use db::{create_pool, init_schema, PgTaskRepository};

/// Connect, initialize the schema, then serve until shutdown.
///
/// Schema initialization completes before the listener is bound, so no
/// request can observe a missing table.
pub async fn serve(db_config: DatabaseConfig, server_config: ServerConfig) -> Result<()> {
    tracing::info!(database = %db_config.describe(), "Connecting to database");
    let pool = create_pool(&db_config).await?;

    init_schema(&pool).await?;

    let state = AppState::new(PgTaskRepository::new(pool));
    http::run_server(state, server_config).await?;

    Ok(())
}
