use chrono::{DateTime, Utc};
use std::fmt;

use super::{ProjectStatus, Task};
use crate::error::{LifecycleError, ProjmanError, Result};

/// A project owning an ordered list of tasks.
///
/// Projects start `Active`, accept tasks while active, and close once every
/// task is done. A closed project is frozen; the only thing left to do with it
/// is delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    /// Insertion order is display order.
    tasks: Vec<Task>,
}

impl Project {
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            status: ProjectStatus::Active,
            created_at: Utc::now(),
            closed_at: None,
            tasks: Vec::new(),
        }
    }

    /// Rebuild a project from stored fields. Run [`Project::check_invariants`]
    /// before trusting the result.
    pub(crate) fn restore(
        name: String,
        description: Option<String>,
        status: ProjectStatus,
        created_at: DateTime<Utc>,
        closed_at: Option<DateTime<Utc>>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            name,
            description,
            status,
            created_at,
            closed_at,
            tasks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == ProjectStatus::Closed
    }

    /// Case-insensitive exact name match.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    pub fn find_task(&self, title: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.has_title(title))
    }

    pub fn find_task_mut(&mut self, title: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.has_title(title))
    }

    /// Append a task.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ProjectClosed`] once the project is closed.
    pub fn add_task(&mut self, task: Task) -> std::result::Result<(), LifecycleError> {
        if self.is_closed() {
            return Err(LifecycleError::ProjectClosed);
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Remove a done task, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::ProjectClosed`] once the project is closed
    /// - `TaskNotFound` if no task has that title
    /// - [`LifecycleError::TaskNotDone`] if the task is still open
    pub fn remove_task(&mut self, title: &str) -> Result<Task> {
        if self.is_closed() {
            return Err(LifecycleError::ProjectClosed.into());
        }
        let index = self
            .tasks
            .iter()
            .position(|t| t.has_title(title))
            .ok_or_else(|| ProjmanError::task_not_found(&self.name, title))?;

        if !self.tasks[index].is_done() {
            return Err(LifecycleError::TaskNotDone.into());
        }
        Ok(self.tasks.remove(index))
    }

    /// True only for a non-empty task list where every task is done.
    ///
    /// An empty project is never "all done".
    #[must_use]
    pub fn all_tasks_done(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(Task::is_done)
    }

    /// Close the project and stamp `closed_at`.
    ///
    /// Checks run in the same order as the closure validator, so both report
    /// the same reason for the same project.
    ///
    /// # Errors
    ///
    /// - [`LifecycleError::AlreadyClosed`] if closed
    /// - [`LifecycleError::TasksIncomplete`] if any task is not done
    /// - [`LifecycleError::NoTasks`] if there are no tasks
    pub fn close(&mut self) -> std::result::Result<(), LifecycleError> {
        if self.is_closed() {
            return Err(LifecycleError::AlreadyClosed);
        }
        if !self.all_tasks_done() {
            return Err(if self.tasks.is_empty() {
                LifecycleError::NoTasks
            } else {
                LifecycleError::TasksIncomplete
            });
        }

        self.status = ProjectStatus::Closed;
        self.closed_at = Some(Utc::now());
        Ok(())
    }

    /// Check the status/timestamp pairing of the project and its tasks.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("project name is empty".to_string());
        }
        match (self.status, self.closed_at) {
            (ProjectStatus::Closed, None) => {
                return Err("project is closed but has no closing time".to_string())
            }
            (ProjectStatus::Active, Some(_)) => {
                return Err("project is active but has a closing time".to_string())
            }
            _ => {}
        }
        if self.is_closed() && !self.all_tasks_done() {
            return Err("closed project has open tasks or no tasks".to_string());
        }

        let mut seen: Vec<String> = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            task.check_invariants()?;
            let key = task.title().to_lowercase();
            if seen.contains(&key) {
                return Err(format!("duplicate task title '{}'", task.title()));
            }
            seen.push(key);
        }
        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status: {})", self.name, self.status)
    }
}
