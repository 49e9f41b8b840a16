//! Task repository - PostgreSQL
//!
//! - create/delete: single statement with RETURNING (no follow-up read)
//! - update: SET clause built from the fields present in the patch
//! - list: newest first, id as tie-breaker

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use super::{DbError, TaskRepository};
use crate::models::{NewTask, TaskId, TaskPatch};

/// Columns selected for every task read. NULL descriptions surface as "".
///
/// Casts and COALESCE also accept tables from earlier deployments, which
/// used naive `TIMESTAMP` columns and a nullable `completed`.
const TASK_COLUMNS: &str = "id, title, COALESCE(description, '') AS description, \
     COALESCE(completed, FALSE) AS completed, \
     created_at::timestamptz AS created_at, updated_at::timestamptz AS updated_at";

/// Task record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Task repository backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, DbError> {
        let sql = format!(
            "INSERT INTO tasks (title, description) VALUES ($1, $2) RETURNING {}",
            TASK_COLUMNS
        );
        let task: Task = sqlx::query_as(&sql)
            .bind(task.title.as_str())
            .bind(&task.description)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(task_id = task.id, "task created");
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, DbError> {
        let sql = format!(
            "SELECT {} FROM tasks ORDER BY created_at DESC, id DESC",
            TASK_COLUMNS
        );
        let tasks: Vec<Task> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(tasks)
    }

    async fn get(&self, id: TaskId) -> Result<Task, DbError> {
        let sql = format!("SELECT {} FROM tasks WHERE id = $1", TASK_COLUMNS);
        sqlx::query_as::<_, Task>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::task_not_found(id))
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, DbError> {
        let (title, description, completed) = patch.into_parts();

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE tasks SET ");
        let mut set = qb.separated(", ");
        if let Some(title) = title {
            set.push("title = ").push_bind_unseparated(title.into_string());
        }
        if let Some(description) = description {
            set.push("description = ").push_bind_unseparated(description);
        }
        if let Some(completed) = completed {
            set.push("completed = ").push_bind_unseparated(completed);
        }
        // Strictly advances even when two updates land in the same microsecond
        set.push("updated_at = GREATEST(NOW(), updated_at + INTERVAL '1 microsecond')");

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING ").push(TASK_COLUMNS);

        let task = qb
            .build_query_as::<Task>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::task_not_found(id))?;

        tracing::debug!(task_id = id, "task updated");
        Ok(task)
    }

    async fn delete(&self, id: TaskId) -> Result<Task, DbError> {
        let sql = format!("DELETE FROM tasks WHERE id = $1 RETURNING {}", TASK_COLUMNS);
        let task: Task = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::task_not_found(id))?;

        tracing::debug!(task_id = id, "task deleted");
        Ok(task)
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
