//! Durable storage for projects.
//!
//! The façade only talks to the [`ProjectStore`] trait. [`FileStore`] is the
//! real implementation; [`crate::testing::MemoryStore`] stands in for it in
//! tests that need to inject failures.
//!
//! The dependency only runs one way: stores receive projects by reference
//! and hand back owned copies, and never keep hold of entities.

mod file;
mod key;
pub mod record;

pub use file::{FileStore, LOCK_SUFFIX, RECORD_FILE, TMP_SUFFIX};
pub use key::storage_key;
pub use record::{StoredProject, MIN_RECORD_VERSION, RECORD_VERSION};

use crate::error::Result;
use crate::model::Project;

/// Abstraction over where project records live.
///
/// Every method addresses a project by name; implementations map names to
/// keys with [`storage_key`].
pub trait ProjectStore {
    /// Write the project and its full task list, replacing any previous
    /// record. A reader never observes metadata without its matching tasks.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the record cannot be written.
    fn save(&self, project: &Project) -> Result<()>;

    /// Load one project by name.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if there is no record, or a persistence
    /// error if the record cannot be read or is corrupt.
    fn load(&self, name: &str) -> Result<Project>;

    /// Load every readable project. Corrupt records are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be enumerated.
    fn load_all(&self) -> Result<Vec<Project>>;

    /// Remove all storage for the project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` if there is no record, or a persistence
    /// error if removal fails.
    fn delete(&self, name: &str) -> Result<()>;

    /// Check whether a record exists for the name.
    fn exists(&self, name: &str) -> bool;

    /// Names of all readable projects, skipping corrupt records.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store itself cannot be enumerated.
    fn list_names(&self) -> Result<Vec<String>>;
}

/// Stable display order for a freshly loaded collection: creation time,
/// then name.
pub(crate) fn sort_projects(projects: &mut [Project]) {
    projects.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.name().cmp(b.name()))
    });
}
