//! Task endpoints
//!
//! | Method | Path              | Success                 |
//! |--------|-------------------|-------------------------|
//! | POST   | /api/tasks        | 201 + task              |
//! | GET    | /api/tasks        | 200 + tasks, newest first |
//! | GET    | /api/tasks/{id}   | 200 + task              |
//! | PUT    | /api/tasks/{id}   | 200 + updated task      |
//! | DELETE | /api/tasks/{id}   | 200 + message and deleted task |

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Deserializer, Serialize};

use crate::db::repos::Task;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ValidTaskId};
use crate::http::server::AppState;
use crate::models::{reject_nul, NewTask, TaskId, TaskPatch, TaskTitle, ValidationError};

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CreateTaskRequest {
    pub fn into_new_task(self) -> Result<NewTask, ValidationError> {
        let title = self
            .title
            .ok_or(ValidationError::Required { field: "title" })?;
        let title = TaskTitle::new(&title)?;
        if let Some(description) = &self.description {
            reject_nul("description", description)?;
        }
        Ok(NewTask::new(title, self.description))
    }
}

/// Update task request.
///
/// Outer `Option` is "was the key sent", inner is "was it null", so
/// `{"completed": false}` and `{}` deserialize differently.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub completed: Option<Option<bool>>,
}

/// Marks a key as present, keeping a JSON `null` as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<TaskPatch, ValidationError> {
        let title = match self.title {
            Some(Some(title)) => Some(TaskTitle::new(&title)?),
            Some(None) => return Err(ValidationError::Null { field: "title" }),
            None => None,
        };
        let completed = match self.completed {
            Some(Some(completed)) => Some(completed),
            Some(None) => return Err(ValidationError::Null { field: "completed" }),
            None => None,
        };
        if let Some(Some(description)) = &self.description {
            reject_nul("description", description)?;
        }

        TaskPatch::new(title, self.description, completed)
    }
}

/// Task response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            completed: t.completed,
            created_at: t.created_at.to_rfc3339(),
            updated_at: t.updated_at.to_rfc3339(),
        }
    }
}

/// Delete confirmation
#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub message: &'static str,
    pub task: TaskResponse,
}

/// GET /api/tasks - list all tasks, newest first
async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state.tasks.list().await?;
    Ok(Json(tasks.into_iter().map(TaskResponse::from).collect()))
}

/// POST /api/tasks - create a new task
async fn create_task(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let new_task = req.into_new_task()?;
    let task = state.tasks.create(new_task).await?;

    tracing::info!(task_id = task.id, "created task");
    Ok((StatusCode::CREATED, Json(TaskResponse::from(task))))
}

/// GET /api/tasks/{id} - get a single task
async fn get_task(
    State(state): State<Arc<AppState>>,
    ValidTaskId(id): ValidTaskId,
) -> Result<Json<TaskResponse>, ApiError> {
    let task = state.tasks.get(id).await?;
    Ok(Json(TaskResponse::from(task)))
}

/// PUT /api/tasks/{id} - apply a sparse update
async fn update_task(
    State(state): State<Arc<AppState>>,
    ValidTaskId(id): ValidTaskId,
    ApiJson(req): ApiJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError> {
    // Validate before touching the store so a rejected patch never bumps updated_at
    let patch = req.into_patch()?;
    let task = state.tasks.update(id, patch).await?;

    tracing::info!(task_id = id, "updated task");
    Ok(Json(TaskResponse::from(task)))
}

/// DELETE /api/tasks/{id} - delete a task
async fn delete_task(
    State(state): State<Arc<AppState>>,
    ValidTaskId(id): ValidTaskId,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let task = state.tasks.delete(id).await?;

    tracing::info!(task_id = id, "deleted task");
    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully",
        task: TaskResponse::from(task),
    }))
}

/// Task routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
