//! Task-level façade operations.

use tracing::info;

use super::{non_blank, Ack, Outcome, ProjectManager};
use crate::error::{LifecycleError, ProjmanError, Result};
use crate::model::Task;
use crate::report::format_timestamp;
use crate::store::ProjectStore;
use crate::validation::{validate_priority, validate_status, validate_task_title};

/// Task operations, borrowed from a [`ProjectManager`].
///
/// Tasks are addressed by project name and task title, both matched
/// case-insensitively.
///
/// # Example
///
/// ```
/// use projman::manager::ProjectManager;
/// use projman::testing::MemoryStore;
///
/// let mut pm = ProjectManager::open(MemoryStore::new()).unwrap();
/// pm.create_project("WebApp", None).unwrap();
///
/// let ack = pm.tasks().create_task("WebApp", "Homepage", None, "high").unwrap();
/// assert_eq!(ack.message, "Task 'Homepage' created");
/// ```
pub struct TaskManager<'a, S: ProjectStore> {
    manager: &'a mut ProjectManager<S>,
}

impl<'a, S: ProjectStore> TaskManager<'a, S> {
    pub(super) fn new(manager: &'a mut ProjectManager<S>) -> Self {
        Self { manager }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Tasks of a project in display order.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` for an unknown project.
    pub fn list_tasks(&self, project: &str) -> Result<&[Task]> {
        self.manager
            .find_project(project)
            .map(|p| p.tasks())
            .ok_or_else(|| ProjmanError::project_not_found(project.trim()))
    }

    pub fn find_task(&self, project: &str, title: &str) -> Option<&Task> {
        self.manager
            .find_project(project)
            .and_then(|p| p.find_task(title.trim()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create a task in an active project.
    ///
    /// An empty `priority` means `normal`.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound`
    /// - [`LifecycleError::ProjectClosed`], checked before the title
    /// - title and priority validation errors
    /// - a persistence error, in which case the task list is unchanged
    pub fn create_task(
        &mut self,
        project: &str,
        title: &str,
        description: Option<&str>,
        priority: &str,
    ) -> Outcome<Task> {
        let index = self.manager.index_of(project)?;
        let current = &self.manager.projects[index];
        if current.is_closed() {
            return Err(LifecycleError::ProjectClosed.into());
        }
        validate_task_title(title, current.tasks())?;
        let priority = validate_priority(priority)?;

        let task = Task::new(title.trim(), non_blank(description), priority);
        let mut staged = current.clone();
        staged.add_task(task.clone())?;
        self.manager.commit(index, staged)?;

        info!(
            project = %self.manager.projects[index].name(),
            task = %task.title(),
            priority = %task.priority(),
            "Created task"
        );
        Ok(Ack::new(format!("Task '{}' created", task.title()), task))
    }

    /// Move a task one step forward.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` / `TaskNotFound`
    /// - [`LifecycleError::TaskImmutableWhenDone`] for a done task, checked
    ///   before the status string is parsed
    /// - `InvalidStatus`, `IllegalTransition`
    /// - a persistence error, in which case the task keeps its old status
    pub fn change_task_status(&mut self, project: &str, title: &str, status: &str) -> Outcome<()> {
        let index = self.manager.index_of(project)?;
        let title = title.trim();

        let current = &self.manager.projects[index];
        let task = current
            .find_task(title)
            .ok_or_else(|| ProjmanError::task_not_found(current.name(), title))?;
        if !task.can_be_modified() {
            return Err(LifecycleError::TaskImmutableWhenDone.into());
        }
        let target = validate_status(status)?;

        let mut staged = current.clone();
        let staged_task = staged
            .find_task_mut(title)
            .ok_or_else(|| ProjmanError::task_not_found(current.name(), title))?;
        staged_task.change_status(target)?;

        let mut message = format!(
            "Status of task '{}' changed to {}",
            staged_task.title(),
            target
        );
        if let Some(completed) = staged_task.completed_at() {
            message.push_str(&format!(" (completed at {})", format_timestamp(completed)));
        }
        let task_title = staged_task.title().to_string();

        self.manager.commit(index, staged)?;
        info!(
            project = %self.manager.projects[index].name(),
            task = %task_title,
            status = %target,
            "Changed task status"
        );
        Ok(Ack::new(message, ()))
    }

    /// Remove a done task.
    ///
    /// # Errors
    ///
    /// - `ProjectNotFound` / `TaskNotFound`
    /// - [`LifecycleError::ProjectClosed`] for a closed project
    /// - [`LifecycleError::TaskNotDone`]
    /// - a persistence error, in which case the task stays
    pub fn delete_task(&mut self, project: &str, title: &str) -> Outcome<()> {
        let index = self.manager.index_of(project)?;

        let mut staged = self.manager.projects[index].clone();
        let removed = staged.remove_task(title.trim())?;
        self.manager.commit(index, staged)?;

        info!(
            project = %self.manager.projects[index].name(),
            task = %removed.title(),
            "Deleted task"
        );
        Ok(Ack::new(format!("Task '{}' deleted", removed.title()), ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::model::{Project, TaskPriority, TaskStatus};
    use crate::testing::{done_task, MemoryStore};

    fn manager_with(names: &[&str]) -> ProjectManager<MemoryStore> {
        let mut pm = ProjectManager::open(MemoryStore::new()).unwrap();
        for name in names {
            pm.create_project(name, None).unwrap();
        }
        pm
    }

    #[test]
    fn test_create_task_persists() {
        let mut pm = manager_with(&["WebApp"]);
        let ack = pm
            .tasks()
            .create_task("webapp", "Homepage", Some("Landing page"), "HIGH")
            .unwrap();

        assert_eq!(ack.value.priority(), TaskPriority::High);
        assert_eq!(ack.value.status(), TaskStatus::New);

        let record = pm.store().record("WebApp").unwrap();
        assert_eq!(record.tasks.len(), 1);
        assert_eq!(record.tasks[0].title, "Homepage");
        assert_eq!(record.tasks[0].description.as_deref(), Some("Landing page"));
    }

    #[test]
    fn test_create_task_default_priority() {
        let mut pm = manager_with(&["P"]);
        let ack = pm.tasks().create_task("P", "t", None, "").unwrap();
        assert_eq!(ack.value.priority(), TaskPriority::Normal);
    }

    #[test]
    fn test_create_task_invalid_priority() {
        let mut pm = manager_with(&["P"]);
        let err = pm.tasks().create_task("P", "t", None, "urgent").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Validation(ValidationError::InvalidPriority { .. })
        ));
        assert!(pm.tasks().list_tasks("P").unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_title_scoped_per_project() {
        let mut pm = manager_with(&["A", "B"]);
        pm.tasks().create_task("A", "fix bug", None, "low").unwrap();

        let err = pm.tasks().create_task("A", "Fix Bug", None, "low").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Validation(ValidationError::DuplicateTitle { .. })
        ));

        assert!(pm.tasks().create_task("B", "Fix Bug", None, "low").is_ok());
    }

    #[test]
    fn test_create_task_in_closed_project() {
        let mut closed = Project::new("Done", None);
        closed.add_task(done_task("t")).unwrap();
        closed.close().unwrap();
        let mut pm = ProjectManager::open(MemoryStore::new().with_projects(&[closed])).unwrap();

        // Closed is reported even when the title is also invalid.
        let err = pm.tasks().create_task("Done", "", None, "x").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Lifecycle(LifecycleError::ProjectClosed)
        ));
        assert_eq!(pm.tasks().list_tasks("Done").unwrap().len(), 1);
    }

    #[test]
    fn test_create_task_rolls_back_on_save_failure() {
        let mut pm = manager_with(&["P"]);
        pm.store().set_fail_saves(true);

        assert!(pm.tasks().create_task("P", "t", None, "low").unwrap_err().is_persistence());
        assert!(pm.tasks().list_tasks("P").unwrap().is_empty());
        assert!(pm.tasks().find_task("P", "t").is_none());
    }

    #[test]
    fn test_change_status_forward_path() {
        let mut pm = manager_with(&["P"]);
        pm.tasks().create_task("P", "t", None, "").unwrap();

        let ack = pm.tasks().change_task_status("P", "T", "in progress").unwrap();
        assert_eq!(ack.message, "Status of task 't' changed to in_progress");

        let ack = pm.tasks().change_task_status("P", "t", "done").unwrap();
        assert!(ack.message.starts_with("Status of task 't' changed to done (completed at "));

        let task = pm.tasks().find_task("P", "t").unwrap().clone();
        assert!(task.is_done());
        assert!(task.completed_at().is_some());

        let record = pm.store().record("P").unwrap();
        assert_eq!(record.tasks[0].status, TaskStatus::Done);
        assert_eq!(record.tasks[0].completed_at, task.completed_at());
    }

    #[test]
    fn test_change_status_skip_rejected() {
        let mut pm = manager_with(&["P"]);
        pm.tasks().create_task("P", "t", None, "").unwrap();

        let err = pm.tasks().change_task_status("P", "t", "done").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Lifecycle(LifecycleError::IllegalTransition {
                from: TaskStatus::New,
                to: TaskStatus::Done
            })
        ));
        assert_eq!(
            pm.tasks().find_task("P", "t").unwrap().status(),
            TaskStatus::New
        );
    }

    #[test]
    fn test_change_status_done_is_immutable() {
        let mut pm = manager_with(&["P"]);
        pm.tasks().create_task("P", "t", None, "").unwrap();
        pm.tasks().change_task_status("P", "t", "in_progress").unwrap();
        pm.tasks().change_task_status("P", "t", "done").unwrap();

        // Reported before the bogus status is even parsed.
        let err = pm.tasks().change_task_status("P", "t", "bogus").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Lifecycle(LifecycleError::TaskImmutableWhenDone)
        ));
    }

    #[test]
    fn test_change_status_invalid_string() {
        let mut pm = manager_with(&["P"]);
        pm.tasks().create_task("P", "t", None, "").unwrap();
        let err = pm.tasks().change_task_status("P", "t", "paused").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Validation(ValidationError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_change_status_save_failure_keeps_old_status() {
        let mut pm = manager_with(&["P"]);
        pm.tasks().create_task("P", "t", None, "").unwrap();
        pm.store().set_fail_saves(true);

        let err = pm.tasks().change_task_status("P", "t", "in_progress").unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(
            pm.tasks().find_task("P", "t").unwrap().status(),
            TaskStatus::New
        );
    }

    #[test]
    fn test_change_status_unknown_task() {
        let mut pm = manager_with(&["P"]);
        let err = pm.tasks().change_task_status("P", "ghost", "done").unwrap_err();
        assert!(matches!(err, ProjmanError::TaskNotFound { .. }));
    }

    #[test]
    fn test_delete_task_only_when_done() {
        let mut pm = manager_with(&["P"]);
        pm.tasks().create_task("P", "t", None, "").unwrap();

        let err = pm.tasks().delete_task("P", "t").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Lifecycle(LifecycleError::TaskNotDone)
        ));

        pm.tasks().change_task_status("P", "t", "in_progress").unwrap();
        pm.tasks().change_task_status("P", "t", "done").unwrap();
        let ack = pm.tasks().delete_task("P", "T").unwrap();
        assert_eq!(ack.message, "Task 't' deleted");
        assert!(pm.tasks().list_tasks("P").unwrap().is_empty());
        assert!(pm.store().record("P").unwrap().tasks.is_empty());
    }

    #[test]
    fn test_delete_task_in_closed_project_rejected() {
        let mut closed = Project::new("Done", None);
        closed.add_task(done_task("t")).unwrap();
        closed.close().unwrap();
        let mut pm = ProjectManager::open(MemoryStore::new().with_projects(&[closed])).unwrap();

        let err = pm.tasks().delete_task("Done", "t").unwrap_err();
        assert!(matches!(
            err,
            ProjmanError::Lifecycle(LifecycleError::ProjectClosed)
        ));
        assert_eq!(pm.tasks().list_tasks("Done").unwrap().len(), 1);
        assert_eq!(pm.store().save_count(), 0);
        assert_eq!(pm.store().record("Done").unwrap().tasks.len(), 1);
    }

    #[test]
    fn test_list_tasks_unknown_project() {
        let mut pm = manager_with(&[]);
        assert!(pm.tasks().list_tasks("nope").unwrap_err().is_not_found());
    }
}
