//! Repository implementations for database access
//!
//! [`TaskRepository`] is the seam between HTTP handlers and storage:
//! - [`PgTaskRepository`]: PostgreSQL via a shared `PgPool`
//! - [`InMemoryTaskRepository`]: process-local map for tests
//!
//! Every operation is a single statement; nothing spans multiple calls.

pub mod memory;
pub mod tasks;

use async_trait::async_trait;

use crate::models::{NewTask, TaskId, TaskPatch};

pub use memory::InMemoryTaskRepository;
pub use tasks::{PgTaskRepository, Task};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn task_not_found(id: TaskId) -> Self {
        Self::NotFound {
            resource: "task",
            id: id.to_string(),
        }
    }
}

/// Durable CRUD access to tasks.
///
/// Inputs arrive already validated ([`NewTask`], non-empty [`TaskPatch`]),
/// so implementations only report storage outcomes.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a task and return the stored row, generated fields included.
    async fn create(&self, task: NewTask) -> Result<Task, DbError>;

    /// All tasks, most recently created first.
    async fn list(&self) -> Result<Vec<Task>, DbError>;

    async fn get(&self, id: TaskId) -> Result<Task, DbError>;

    /// Apply the fields present in `patch` and refresh `updated_at`.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, DbError>;

    /// Remove the task, returning its last stored state.
    async fn delete(&self, id: TaskId) -> Result<Task, DbError>;

    /// Cheap liveness probe for health checks.
    async fn ping(&self) -> Result<(), DbError>;
}
