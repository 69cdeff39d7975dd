//! Orchestration façade over validation, the lifecycle engine and the store.
//!
//! Every mutating operation follows the same pattern:
//!
//! 1. validate the request against the current in-memory state
//! 2. apply the lifecycle change to a *staged clone* of the affected project
//! 3. persist the staged clone
//! 4. only then swap it into memory
//!
//! A failed save leaves memory exactly as it was, so memory never runs ahead
//! of disk and the failure reaches the caller as a persistence error.

mod tasks;

pub use tasks::TaskManager;

use tracing::{info, warn};

use crate::error::{LifecycleError, ProjmanError, Result};
use crate::model::Project;
use crate::store::ProjectStore;
use crate::validation::{validate_project_closure, validate_project_name};

/// A successful façade operation: a human-readable message plus the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack<T> {
    pub message: String,
    pub value: T,
}

impl<T> Ack<T> {
    pub fn new(message: impl Into<String>, value: T) -> Self {
        Self {
            message: message.into(),
            value,
        }
    }
}

/// Result of a façade operation. The error's `Display` is the failure
/// message.
pub type Outcome<T> = Result<Ack<T>>;

/// Collapse an outcome into the `(ok, message)` pair a presentation layer
/// renders.
pub fn summarize<T>(outcome: &Outcome<T>) -> (bool, String) {
    match outcome {
        Ok(ack) => (true, ack.message.clone()),
        Err(e) => (false, e.to_string()),
    }
}

/// Blank optional text is treated as absent.
pub(crate) fn non_blank(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Owns the in-memory project collection and the store backing it.
///
/// Each instance is independent; nothing is shared between managers except
/// what they share on disk.
#[derive(Debug)]
pub struct ProjectManager<S: ProjectStore> {
    store: S,
    projects: Vec<Project>,
}

impl<S: ProjectStore> ProjectManager<S> {
    /// Create a manager and load every project the store holds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated. Individual corrupt
    /// records are skipped by the store, not reported here.
    pub fn open(store: S) -> Result<Self> {
        let projects = store.load_all()?;
        info!(count = projects.len(), "Loaded projects");
        Ok(Self { store, projects })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Discard memory and reload everything from the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be enumerated; memory is left
    /// untouched in that case.
    pub fn reload(&mut self) -> Result<()> {
        self.projects = self.store.load_all()?;
        Ok(())
    }

    // =========================================================================
    // Reads (never touch the store)
    // =========================================================================

    pub fn list_projects(&self) -> &[Project] {
        &self.projects
    }

    /// Case-insensitive exact name lookup.
    pub fn find_project(&self, name: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.has_name(name.trim()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Create and persist a new active project.
    ///
    /// # Errors
    ///
    /// Validation errors for bad names; a persistence error if the save
    /// fails, in which case the project is not kept in memory.
    pub fn create_project(&mut self, name: &str, description: Option<&str>) -> Outcome<Project> {
        validate_project_name(name, &self.projects)?;

        let project = Project::new(name.trim(), non_blank(description));
        if let Err(e) = self.store.save(&project) {
            warn!(project = %project.name(), "Project not created, save failed: {}", e);
            return Err(e);
        }

        self.projects.push(project.clone());
        info!(project = %project.name(), "Created project");
        Ok(Ack::new(
            format!("Project '{}' created", project.name()),
            project,
        ))
    }

    /// Close a project whose tasks are all done.
    ///
    /// # Errors
    ///
    /// `ProjectNotFound`, a closure lifecycle error, or a persistence error
    /// (the project then stays active in memory).
    pub fn close_project(&mut self, name: &str) -> Outcome<()> {
        let index = self.index_of(name)?;
        validate_project_closure(&self.projects[index])?;

        let mut staged = self.projects[index].clone();
        staged.close()?;
        self.commit(index, staged)?;

        let project = &self.projects[index];
        info!(project = %project.name(), "Closed project");
        Ok(Ack::new(format!("Project '{}' closed", project.name()), ()))
    }

    /// Delete a closed project from disk and memory.
    ///
    /// # Errors
    ///
    /// `ProjectNotFound`, [`LifecycleError::ProjectNotClosed`], or a
    /// persistence error (the project then stays in memory).
    pub fn delete_project(&mut self, name: &str) -> Outcome<()> {
        let index = self.index_of(name)?;
        if !self.projects[index].is_closed() {
            return Err(LifecycleError::ProjectNotClosed.into());
        }

        let project_name = self.projects[index].name().to_string();
        match self.store.delete(&project_name) {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                warn!(project = %project_name, "No record on disk for deleted project");
            }
            Err(e) => return Err(e),
        }

        self.projects.remove(index);
        info!(project = %project_name, "Deleted project");
        Ok(Ack::new(format!("Project '{project_name}' deleted"), ()))
    }

    /// Borrow the task-level operations.
    pub fn tasks(&mut self) -> TaskManager<'_, S> {
        TaskManager::new(self)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn index_of(&self, name: &str) -> Result<usize> {
        self.projects
            .iter()
            .position(|p| p.has_name(name.trim()))
            .ok_or_else(|| ProjmanError::project_not_found(name.trim()))
    }

    /// Persist `staged` and, only if that worked, replace the project at
    /// `index` with it.
    fn commit(&mut self, index: usize, staged: Project) -> Result<()> {
        if let Err(e) = self.store.save(&staged) {
            warn!(project = %staged.name(), "Change discarded, save failed: {}", e);
            return Err(e);
        }
        self.projects[index] = staged;
        Ok(())
    }
}
