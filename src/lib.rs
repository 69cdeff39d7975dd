//! Projman - project and task tracking with a durable file-backed store.
//!
//! Projects own an ordered list of tasks. Tasks move one way through
//! `new -> in_progress -> done`; a project closes once every task is done and
//! can then be deleted. Every change is written to disk before it is visible
//! in memory.
//!
//! # Architecture
//!
//! - [`model`] - `Project`, `Task` and their status enums, with the lifecycle
//!   rules enforced by the entities themselves
//! - [`validation`] - name, title, priority and status checks
//! - [`store`] - the `ProjectStore` trait and the JSON-file `FileStore`
//! - [`manager`] - `ProjectManager`, the façade that ties the above together
//! - [`report`] - plain-text renderings for the command line
//! - [`config`] - TOML configuration
//! - [`error`] - error types and exit codes
//! - [`testing`] - in-memory store and assertions for tests
//!
//! # Example
//!
//! ```
//! use projman::manager::ProjectManager;
//! use projman::store::FileStore;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut pm = ProjectManager::open(FileStore::new(dir.path())).unwrap();
//!
//! pm.create_project("WebApp", None).unwrap();
//! pm.tasks().create_task("WebApp", "Homepage", None, "high").unwrap();
//! pm.tasks().change_task_status("WebApp", "Homepage", "in_progress").unwrap();
//! pm.tasks().change_task_status("WebApp", "Homepage", "done").unwrap();
//! pm.close_project("WebApp").unwrap();
//!
//! let reopened = ProjectManager::open(FileStore::new(dir.path())).unwrap();
//! assert!(reopened.find_project("webapp").unwrap().is_closed());
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod manager;
pub mod model;
pub mod report;
pub mod store;
pub mod testing;
pub mod validation;

// Re-export commonly used types
pub use error::{LifecycleError, ProjmanError, Result, ValidationError};

pub use config::Config;

pub use manager::{summarize, Ack, Outcome, ProjectManager, TaskManager};

pub use model::{Project, ProjectStatus, Task, TaskPriority, TaskStatus};

pub use store::{storage_key, FileStore, ProjectStore};
