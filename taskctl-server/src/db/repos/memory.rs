//! In-memory task repository for testing
//!
//! Same observable behaviour as the PostgreSQL repository, minus durability.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::{DbError, Task, TaskRepository};
use crate::models::{NewTask, TaskId, TaskPatch};

#[derive(Default)]
struct State {
    next_id: TaskId,
    tasks: BTreeMap<TaskId, Task>,
}

/// Mock task repository backed by a map
#[derive(Default)]
pub struct InMemoryTaskRepository {
    state: Mutex<State>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: NewTask) -> Result<Task, DbError> {
        let mut state = self.state();
        state.next_id += 1;

        let now = Utc::now();
        let task = Task {
            id: state.next_id,
            title: task.title.into_string(),
            description: task.description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, DbError> {
        let mut tasks: Vec<Task> = self.state().tasks.values().cloned().collect();
        tasks.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(tasks)
    }

    async fn get(&self, id: TaskId) -> Result<Task, DbError> {
        self.state()
            .tasks
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::task_not_found(id))
    }

    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, DbError> {
        let mut state = self.state();
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or_else(|| DbError::task_not_found(id))?;

        let (title, description, completed) = patch.into_parts();
        if let Some(title) = title {
            task.title = title.into_string();
        }
        if let Some(description) = description {
            task.description = description.unwrap_or_default();
        }
        if let Some(completed) = completed {
            task.completed = completed;
        }
        task.updated_at = Utc::now().max(task.updated_at + Duration::microseconds(1));

        Ok(task.clone())
    }

    async fn delete(&self, id: TaskId) -> Result<Task, DbError> {
        self.state()
            .tasks
            .remove(&id)
            .ok_or_else(|| DbError::task_not_found(id))
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::contract;

    #[tokio::test]
    async fn create_fills_generated_fields() {
        contract::create_fills_generated_fields(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn sparse_update_preserves_untouched() {
        contract::sparse_update_preserves_untouched(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn falsy_values_are_applied() {
        contract::falsy_values_are_applied(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn null_description_reads_back_empty() {
        contract::null_description_reads_back_empty(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn title_update() {
        contract::title_update(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        contract::missing_ids_are_not_found(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        contract::list_is_newest_first(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn delete_is_final() {
        contract::delete_is_final(&InMemoryTaskRepository::new()).await;
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let repo = InMemoryTaskRepository::new();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let repo = InMemoryTaskRepository::new();
        let title = crate::models::TaskTitle::new("once").unwrap();

        let first = repo.create(NewTask::new(title.clone(), None)).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create(NewTask::new(title, None)).await.unwrap();

        assert!(second.id > first.id);
    }
}
