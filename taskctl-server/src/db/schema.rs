//! Schema initialization for the tasks table
//!
//! Idempotent: every statement is create-if-absent, so running it on each
//! boot is safe. Must complete before the server accepts requests.

use sqlx::PgPool;

/// Arbitrary key for the advisory lock that serializes concurrent boots.
const SCHEMA_LOCK_KEY: i64 = 0x7461_736b_7363_6865;

/// Create the tasks table and its index if absent.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Initializing task schema...");

    let mut tx = pool.begin().await?;

    // Two replicas booting at once would otherwise race on CREATE TABLE
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    // Constraints live inline so they only apply to tables created here;
    // an existing table is used as found
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL
                CONSTRAINT tasks_title_not_blank CHECK (char_length(btrim(title)) > 0),
            description TEXT,
            completed BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS tasks_created_at_idx ON tasks (created_at DESC, id DESC)",
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Task schema ready");
    Ok(())
}

/// Pools scoped to a throwaway Postgres schema, for tests that need their
/// own `tasks` table.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::time::{SystemTime, UNIX_EPOCH};

    use sqlx::PgPool;

    use crate::config::DatabaseConfig;
    use crate::db::create_pool;

    /// DDL of tables created by earlier deployments: naive timestamps and a
    /// nullable `completed`, no title check.
    pub const LEGACY_TASKS_DDL: &str = r#"
        CREATE TABLE tasks (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255) NOT NULL,
            description TEXT,
            completed BOOLEAN DEFAULT FALSE,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
    "#;

    pub struct ScopedSchema {
        pub pool: PgPool,
        admin: PgPool,
        name: String,
    }

    impl ScopedSchema {
        pub async fn create(prefix: &str) -> Self {
            let config = DatabaseConfig::from_env().expect("DATABASE_URL required");
            let admin = create_pool(&config).await.expect("pool creation failed");

            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock before epoch")
                .as_nanos();
            let name = format!("{}_{}", prefix, nanos);
            sqlx::query(&format!("CREATE SCHEMA {}", name))
                .execute(&admin)
                .await
                .expect("create schema failed");

            let mut scoped = config.clone();
            scoped.connect_options = scoped
                .connect_options
                .options([("search_path", name.as_str())]);
            let pool = create_pool(&scoped).await.expect("scoped pool failed");

            Self { pool, admin, name }
        }

        pub async fn teardown(self) {
            self.pool.close().await;
            sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.name))
                .execute(&self.admin)
                .await
                .expect("drop schema failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{ScopedSchema, LEGACY_TASKS_DDL};
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::db::create_pool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn init_is_idempotent() {
        let config = DatabaseConfig::from_env().expect("DATABASE_URL required");
        let pool = create_pool(&config).await.expect("pool creation failed");

        init_schema(&pool).await.expect("first init failed");
        init_schema(&pool).await.expect("second init failed");

        let exists: (bool,) = sqlx::query_as("SELECT to_regclass('tasks') IS NOT NULL")
            .fetch_one(&pool)
            .await
            .expect("query failed");
        assert!(exists.0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn blank_title_rejected_by_store() {
        let schema = ScopedSchema::create("fresh_blank").await;
        init_schema(&schema.pool).await.expect("init failed");

        let result = sqlx::query("INSERT INTO tasks (title) VALUES ('   ')")
            .execute(&schema.pool)
            .await;
        assert!(result.is_err());

        schema.teardown().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn existing_table_with_blank_titles_is_left_alone() {
        let schema = ScopedSchema::create("legacy_blank").await;
        sqlx::query(LEGACY_TASKS_DDL)
            .execute(&schema.pool)
            .await
            .expect("legacy table failed");
        sqlx::query("INSERT INTO tasks (title) VALUES ('   ')")
            .execute(&schema.pool)
            .await
            .expect("insert failed");

        init_schema(&schema.pool).await.expect("init over existing table failed");
        init_schema(&schema.pool).await.expect("second init failed");

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(&schema.pool)
            .await
            .expect("count failed");
        assert_eq!(count.0, 1);

        schema.teardown().await;
    }
}
