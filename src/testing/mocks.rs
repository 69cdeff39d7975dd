//! In-memory test double for [`ProjectStore`].
//!
//! Records go through the same [`StoredProject`] conversion as the file
//! store, so round-trip behaviour matches; failures can be switched on at
//! any point to exercise the façade's rollback paths.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io;

use tracing::warn;

use crate::error::{ProjmanError, Result};
use crate::model::Project;
use crate::store::{sort_projects, storage_key, ProjectStore, StoredProject};

/// Mock implementation of the project store.
///
/// # Example
///
/// ```
/// use projman::model::Project;
/// use projman::store::ProjectStore;
/// use projman::testing::MemoryStore;
///
/// let store = MemoryStore::new();
/// store.save(&Project::new("WebApp", None)).unwrap();
///
/// store.set_fail_saves(true);
/// assert!(store.save(&Project::new("Other", None)).is_err());
/// assert_eq!(store.save_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RefCell<BTreeMap<String, StoredProject>>,
    fail_saves: Cell<bool>,
    fail_deletes: Cell<bool>,
    save_count: Cell<u32>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-saved projects.
    #[must_use]
    pub fn with_projects(self, projects: &[Project]) -> Self {
        {
            let mut records = self.records.borrow_mut();
            for project in projects {
                records.insert(storage_key(project.name()), StoredProject::from(project));
            }
        }
        self
    }

    /// Make every subsequent save fail.
    #[must_use]
    pub fn with_failing_saves(self) -> Self {
        self.fail_saves.set(true);
        self
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.set(fail);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.get()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Stored record for `name`, as it would be written to disk.
    pub fn record(&self, name: &str) -> Option<StoredProject> {
        self.records.borrow().get(&storage_key(name)).cloned()
    }

    /// Put a raw record in place, bypassing conversion. Used to simulate
    /// corrupt data.
    pub fn insert_raw(&self, key: &str, record: StoredProject) {
        self.records.borrow_mut().insert(key.to_string(), record);
    }

    /// Whether the record under `name`'s key was saved for that name.
    fn owns_key(&self, name: &str) -> bool {
        self.records
            .borrow()
            .get(&storage_key(name))
            .is_some_and(|r| r.project.name.to_lowercase() == name.trim().to_lowercase())
    }

    fn injected(operation: &'static str, key: String) -> ProjmanError {
        ProjmanError::persistence(
            operation,
            key,
            io::Error::new(io::ErrorKind::Other, "injected failure"),
        )
    }
}

impl ProjectStore for MemoryStore {
    fn save(&self, project: &Project) -> Result<()> {
        let key = storage_key(project.name());
        if self.fail_saves.get() {
            return Err(Self::injected("save", key));
        }
        self.records
            .borrow_mut()
            .insert(key, StoredProject::from(project));
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Project> {
        let key = storage_key(name);
        let record = self
            .records
            .borrow()
            .get(&key)
            .cloned()
            .ok_or_else(|| ProjmanError::project_not_found(name))?;
        let project = record
            .into_project()
            .map_err(|reason| ProjmanError::corrupt(key, reason))?;
        if !project.has_name(name.trim()) {
            return Err(ProjmanError::project_not_found(name));
        }
        Ok(project)
    }

    fn load_all(&self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        for (key, record) in self.records.borrow().iter() {
            match record.clone().into_project() {
                Ok(project) => projects.push(project),
                Err(reason) => warn!(key = %key, "Skipping unreadable project record: {}", reason),
            }
        }
        sort_projects(&mut projects);
        Ok(projects)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let key = storage_key(name);
        if self.fail_deletes.get() {
            return Err(Self::injected("delete", key));
        }
        if !self.owns_key(name) {
            return Err(ProjmanError::project_not_found(name));
        }
        self.records.borrow_mut().remove(&key);
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.owns_key(name)
    }

    fn list_names(&self) -> Result<Vec<String>> {
        Ok(self.load_all()?.iter().map(|p| p.name().to_string()).collect())
    }
}
