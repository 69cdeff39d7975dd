//! Stateless checks run before any entity is mutated.
//!
//! Every function either accepts the input or returns the reason it was
//! rejected; none of them touch the entities they inspect.

use crate::error::{LifecycleError, ValidationError};
use crate::model::{Project, Task, TaskPriority, TaskStatus};
use crate::store::storage_key;

/// Check a new project name against every existing project, open or closed.
///
/// # Errors
///
/// - [`ValidationError::EmptyName`] if blank after trimming
/// - [`ValidationError::DuplicateName`] on a case-insensitive name match
/// - [`ValidationError::StorageKeyCollision`] if the name would land in an
///   existing project's record directory
pub fn validate_project_name(name: &str, existing: &[Project]) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if existing.iter().any(|p| p.has_name(name)) {
        return Err(ValidationError::DuplicateName {
            name: name.to_string(),
        });
    }

    // Compared case-insensitively because the store may live on a
    // case-insensitive filesystem.
    let key = storage_key(name).to_lowercase();
    if let Some(other) = existing
        .iter()
        .find(|p| storage_key(p.name()).to_lowercase() == key)
    {
        return Err(ValidationError::StorageKeyCollision {
            name: name.to_string(),
            existing: other.name().to_string(),
        });
    }

    Ok(())
}

/// Check a new task title against the tasks of its own project only.
///
/// # Errors
///
/// - [`ValidationError::EmptyTitle`] if blank after trimming
/// - [`ValidationError::DuplicateTitle`] on a case-insensitive match
pub fn validate_task_title(title: &str, existing: &[Task]) -> Result<(), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if existing.iter().any(|t| t.has_title(title)) {
        return Err(ValidationError::DuplicateTitle {
            title: title.to_string(),
        });
    }
    Ok(())
}

/// Parse a priority; blank input means the default (`normal`).
///
/// # Errors
///
/// Returns [`ValidationError::InvalidPriority`] for anything else.
pub fn validate_priority(input: &str) -> Result<TaskPriority, ValidationError> {
    if input.trim().is_empty() {
        return Ok(TaskPriority::default());
    }
    input.parse()
}

/// Parse a requested task status.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidStatus`] unless the input names
/// new, in progress or done.
pub fn validate_status(input: &str) -> Result<TaskStatus, ValidationError> {
    input.parse()
}

/// Check whether `project` may be closed.
///
/// Checks run in order and the first failure wins. This agrees with
/// [`Project::close`]: a project without tasks is never closable.
///
/// # Errors
///
/// - [`LifecycleError::AlreadyClosed`]
/// - [`LifecycleError::TasksIncomplete`] if any task is not done
/// - [`LifecycleError::NoTasks`] if the task list is empty
pub fn validate_project_closure(project: &Project) -> Result<(), LifecycleError> {
    if project.is_closed() {
        return Err(LifecycleError::AlreadyClosed);
    }
    if project.tasks().iter().any(|t| !t.is_done()) {
        return Err(LifecycleError::TasksIncomplete);
    }
    if project.tasks().is_empty() {
        return Err(LifecycleError::NoTasks);
    }
    Ok(())
}
