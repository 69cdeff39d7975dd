//! Test fixtures for creating reproducible store directories.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::model::{Project, Task, TaskPriority, TaskStatus};
use crate::store::FileStore;

/// A temporary store root, removed when dropped.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::empty();
/// let store = fixture.store();
/// ```
pub struct TestFixture {
    temp_dir: TempDir,
}

impl TestFixture {
    /// An empty store directory.
    ///
    /// # Panics
    ///
    /// Panics if temporary directory creation fails.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Root directory handed to the store.
    #[must_use]
    pub fn store_root(&self) -> PathBuf {
        self.temp_dir.path().join("projects")
    }

    #[must_use]
    pub fn store(&self) -> FileStore {
        FileStore::new(self.store_root())
    }

    /// Write raw bytes as a record for `key`, for corrupt-data tests.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw_record(&self, key: &str, content: &str) {
        let dir = self.store_root().join(key);
        std::fs::create_dir_all(&dir).expect("Failed to create record dir");
        std::fs::write(dir.join(crate::store::RECORD_FILE), content)
            .expect("Failed to write raw record");
    }
}

/// An active project with one task in each status.
#[must_use]
pub fn mixed_project(name: &str) -> Project {
    let mut project = Project::new(name, Some(format!("{name} description")));

    project
        .add_task(Task::new("Backlog", None, TaskPriority::Low))
        .expect("project is active");

    let mut started = Task::new("Started", Some("halfway".into()), TaskPriority::Normal);
    started
        .change_status(TaskStatus::InProgress)
        .expect("new -> in_progress");
    project.add_task(started).expect("project is active");

    project.add_task(done_task("Finished")).expect("project is active");
    project
}

/// A task walked all the way to done.
#[must_use]
pub fn done_task(title: &str) -> Task {
    let mut task = Task::new(title, None, TaskPriority::High);
    task.change_status(TaskStatus::InProgress)
        .expect("new -> in_progress");
    task.change_status(TaskStatus::Done)
        .expect("in_progress -> done");
    task
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProjectStore;
    use crate::testing::assert_project_invariants;

    #[test]
    fn test_mixed_project_shape() {
        let p = mixed_project("Demo");
        assert_eq!(p.task_count(), 3);
        assert_eq!(p.tasks()[0].status(), TaskStatus::New);
        assert_eq!(p.tasks()[1].status(), TaskStatus::InProgress);
        assert_eq!(p.tasks()[2].status(), TaskStatus::Done);
        assert_project_invariants(&p);
    }

    #[test]
    fn test_fixture_store_is_isolated() {
        let a = TestFixture::empty();
        let b = TestFixture::empty();
        a.store().save(&mixed_project("Demo")).unwrap();

        assert!(a.store().exists("Demo"));
        assert!(!b.store().exists("Demo"));
    }

    #[test]
    fn test_write_raw_record() {
        let fixture = TestFixture::empty();
        fixture.write_raw_record("Broken", "nope");
        assert!(fixture.store_root().join("Broken").join("project.json").exists());
        assert!(fixture.store().load_all().unwrap().is_empty());
    }
}
