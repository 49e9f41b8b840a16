//! Validated task inputs: creation payload and sparse patch

use super::{TaskTitle, ValidationError};

/// Task identifier (`SERIAL` primary key)
pub type TaskId = i32;

/// A task ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: String,
}

impl NewTask {
    /// Omitted description defaults to the empty string.
    pub fn new(title: TaskTitle, description: Option<String>) -> Self {
        Self {
            title,
            description: description.unwrap_or_default(),
        }
    }
}

/// Sparse update for a task.
///
/// Each field is `None` when absent from the request and `Some(_)` when the
/// caller sent it, so `Some(false)` and `Some(String::new())` are real
/// updates. `description` is the only nullable column, hence the extra layer.
///
/// A patch always carries at least one field; [`TaskPatch::new`] rejects
/// empty ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<Option<String>>,
    completed: Option<bool>,
}

impl TaskPatch {
    /// Build a patch, failing with [`ValidationError::EmptyPatch`] when no
    /// field is present.
    ///
    /// # Example
    /// ```
    /// use taskctl_server::models::{TaskPatch, ValidationError};
    ///
    /// assert!(TaskPatch::new(None, None, Some(false)).is_ok());
    /// assert_eq!(
    ///     TaskPatch::new(None, None, None).unwrap_err(),
    ///     ValidationError::EmptyPatch
    /// );
    /// ```
    pub fn new(
        title: Option<TaskTitle>,
        description: Option<Option<String>>,
        completed: Option<bool>,
    ) -> Result<Self, ValidationError> {
        if title.is_none() && description.is_none() && completed.is_none() {
            return Err(ValidationError::EmptyPatch);
        }

        Ok(Self {
            title,
            description,
            completed,
        })
    }

    /// Patch that only flips completion.
    pub fn completion(completed: bool) -> Self {
        Self {
            title: None,
            description: None,
            completed: Some(completed),
        }
    }

    /// Consume the patch into `(title, description, completed)`.
    pub fn into_parts(self) -> (Option<TaskTitle>, Option<Option<String>>, Option<bool>) {
        (self.title, self.description, self.completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_defaults_description() {
        let task = NewTask::new(TaskTitle::new("Buy milk").unwrap(), None);
        assert_eq!(task.description, "");
    }

    #[test]
    fn empty_patch_rejected() {
        assert_eq!(
            TaskPatch::new(None, None, None).unwrap_err(),
            ValidationError::EmptyPatch
        );
    }

    #[test]
    fn falsy_values_are_present() {
        let patch = TaskPatch::new(None, Some(Some(String::new())), Some(false)).unwrap();
        assert_eq!(patch.into_parts(), (None, Some(Some(String::new())), Some(false)));
    }

    #[test]
    fn explicit_null_description_is_present() {
        let patch = TaskPatch::new(None, Some(None), None).unwrap();
        assert_eq!(patch.into_parts(), (None, Some(None), None));
    }

    #[test]
    fn completion_patch() {
        let patch = TaskPatch::completion(true);
        assert_eq!(patch.into_parts(), (None, None, Some(true)));
    }
}
