//! Custom error types for projman.
//!
//! Errors are grouped the way callers handle them: validation and lifecycle
//! failures are expected and leave state untouched, lookups can miss, and
//! persistence failures are hard errors that the façade surfaces as-is.

use std::path::PathBuf;
use thiserror::Error;

use crate::model::TaskStatus;

/// Input rejected before any entity was touched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Project name must not be empty")]
    EmptyName,

    #[error("A project named '{name}' already exists")]
    DuplicateName { name: String },

    /// Two distinct names would share one record directory.
    #[error("Project name '{name}' would be stored under the same key as existing project '{existing}'")]
    StorageKeyCollision { name: String, existing: String },

    #[error("Task title must not be empty")]
    EmptyTitle,

    #[error("A task titled '{title}' already exists in this project")]
    DuplicateTitle { title: String },

    #[error("Priority must be 'low', 'normal' or 'high' (got '{value}')")]
    InvalidPriority { value: String },

    #[error("Invalid status '{value}'. Valid statuses are: new, in_progress, done")]
    InvalidStatus { value: String },
}

/// A request the entity state machine does not allow.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Status cannot change from {from} to {to}")]
    IllegalTransition { from: TaskStatus, to: TaskStatus },

    #[error("A closed project can no longer be changed")]
    ProjectClosed,

    #[error("The project is already closed")]
    AlreadyClosed,

    #[error("A project can only be closed when all of its tasks are done")]
    TasksIncomplete,

    #[error("Cannot close a project without tasks")]
    NoTasks,

    #[error("Only closed projects can be deleted")]
    ProjectNotClosed,

    #[error("Only completed tasks can be deleted")]
    TaskNotDone,

    #[error("Completed tasks can no longer be changed")]
    TaskImmutableWhenDone,
}

/// Main error type for projman operations
#[derive(Error, Debug)]
pub enum ProjmanError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Project '{name}' not found")]
    ProjectNotFound { name: String },

    #[error("Task '{title}' not found in project '{project}'")]
    TaskNotFound { project: String, title: String },

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// A store read or write failed.
    #[error("Failed to {operation} project record '{key}': {source}")]
    Persistence {
        operation: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored record exists but cannot be turned back into a project.
    #[error("Corrupt project record at {path}: {reason}")]
    CorruptRecord { path: PathBuf, reason: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProjmanError {
    // =========================================================================
    // Constructor helpers
    // =========================================================================

    /// Create a project-not-found error
    pub fn project_not_found(name: impl Into<String>) -> Self {
        Self::ProjectNotFound { name: name.into() }
    }

    /// Create a task-not-found error
    pub fn task_not_found(project: impl Into<String>, title: impl Into<String>) -> Self {
        Self::TaskNotFound {
            project: project.into(),
            title: title.into(),
        }
    }

    /// Wrap an I/O failure that happened while touching a record
    pub fn persistence(
        operation: &'static str,
        key: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::Persistence {
            operation,
            key: key.into(),
            source,
        }
    }

    /// Create a corrupt-record error
    pub fn corrupt(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::CorruptRecord {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    // =========================================================================
    // Classification helpers
    // =========================================================================

    /// Expected outcomes of bad input; nothing changed and the caller may retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::Lifecycle(_)
                | Self::ProjectNotFound { .. }
                | Self::TaskNotFound { .. }
        )
    }

    /// Check if this error came from the durable store
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Persistence { .. } | Self::CorruptRecord { .. } | Self::Io(_) | Self::Json(_)
        )
    }

    /// Check if this error is a "no such project/task" lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound { .. } | Self::TaskNotFound { .. })
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Lifecycle(_) => 3,
            Self::ProjectNotFound { .. } | Self::TaskNotFound { .. } => 4,
            Self::Persistence { .. } | Self::CorruptRecord { .. } | Self::Io(_) | Self::Json(_) => {
                5
            }
            Self::Config { .. } => 7,
            Self::Other(_) => 1,
        }
    }
}

/// Type alias for projman results
pub type Result<T> = std::result::Result<T, ProjmanError>;
