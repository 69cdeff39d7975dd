use chrono::{DateTime, Utc};
use std::fmt;

use super::{TaskPriority, TaskStatus};
use crate::error::LifecycleError;

/// A unit of work owned by exactly one project.
///
/// Title and priority are fixed at creation. Status only moves forward
/// (`New -> InProgress -> Done`) and `completed_at` is stamped on the move
/// to `Done`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task in the `New` state.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: Option<String>,
        priority: TaskPriority,
    ) -> Self {
        Self {
            title: title.into(),
            description,
            priority,
            status: TaskStatus::New,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Rebuild a task from stored fields without running the state machine.
    ///
    /// Callers are expected to check [`Task::check_invariants`] afterwards.
    pub(crate) fn restore(
        title: String,
        description: Option<String>,
        priority: TaskPriority,
        status: TaskStatus,
        created_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            title,
            description,
            priority,
            status,
            created_at,
            completed_at,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Case-insensitive exact title match.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Move the task to `target`.
    ///
    /// Only `New -> InProgress` and `InProgress -> Done` are accepted. A
    /// rejected transition leaves every field untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::IllegalTransition`] for any other move.
    pub fn change_status(&mut self, target: TaskStatus) -> Result<(), LifecycleError> {
        if !self.status.can_transition_to(target) {
            return Err(LifecycleError::IllegalTransition {
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        if target == TaskStatus::Done {
            self.completed_at = Some(Utc::now());
        }
        Ok(())
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Done tasks are frozen.
    #[must_use]
    pub fn can_be_modified(&self) -> bool {
        !self.is_done()
    }

    /// `completed_at` is set iff the task is done.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("task title is empty".to_string());
        }
        match (self.status, self.completed_at) {
            (TaskStatus::Done, None) => Err(format!(
                "task '{}' is done but has no completion time",
                self.title
            )),
            (TaskStatus::New | TaskStatus::InProgress, Some(_)) => Err(format!(
                "task '{}' has a completion time but is {}",
                self.title, self.status
            )),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} (priority: {})",
            self.status.as_str().to_uppercase(),
            self.title,
            self.priority
        )
    }
}
