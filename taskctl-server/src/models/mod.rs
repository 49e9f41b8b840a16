//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod title;
pub mod task;

pub use validation::{reject_nul, ValidationError};
pub use title::{TaskTitle, MAX_TITLE_LEN};
pub use task::{NewTask, TaskId, TaskPatch};
