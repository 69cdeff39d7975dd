//! File-backed project store with atomic per-project writes.
//!
//! Layout:
//!
//! ```text
//! <root>/
//!   <storage key>/
//!     project.json        live record (metadata + tasks)
//!     project.json.lock   fs2 lock held while writing
//!     project.json.tmp    only present mid-write
//! ```

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, warn};

use super::record::StoredProject;
use super::{sort_projects, storage_key, ProjectStore};
use crate::error::{ProjmanError, Result};
use crate::model::Project;

/// Record file name inside each project directory.
pub const RECORD_FILE: &str = "project.json";

/// Temporary file suffix for atomic writes.
pub const TMP_SUFFIX: &str = ".tmp";

/// Lock file suffix for writer exclusion.
pub const LOCK_SUFFIX: &str = ".lock";

/// Stores each project as one JSON record in its own directory under `root`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until the
    /// first save.
    #[must_use]
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Create a store and make sure its root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root)
            .map_err(|e| ProjmanError::persistence("create", store.root.display().to_string(), e))?;
        Ok(store)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the record for `name`.
    #[must_use]
    pub fn project_dir(&self, name: &str) -> PathBuf {
        self.root.join(storage_key(name))
    }

    #[must_use]
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.project_dir(name).join(RECORD_FILE)
    }

    fn tmp_path(dir: &Path) -> PathBuf {
        dir.join(format!("{RECORD_FILE}{TMP_SUFFIX}"))
    }

    fn lock_path(dir: &Path) -> PathBuf {
        dir.join(format!("{RECORD_FILE}{LOCK_SUFFIX}"))
    }

    /// Read and decode a record file. Missing files are `Ok(None)`.
    fn read_record(path: &Path) -> Result<Option<Project>> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ProjmanError::persistence("read", path.display().to_string(), e)),
        };

        let stored: StoredProject = serde_json::from_str(&content)
            .map_err(|e| ProjmanError::corrupt(path, e.to_string()))?;
        let project = stored
            .into_project()
            .map_err(|reason| ProjmanError::corrupt(path, reason))?;
        Ok(Some(project))
    }

    /// Record files of every project directory under the root, sorted by
    /// directory name. Entries that are not directories are skipped.
    fn record_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ProjmanError::persistence(
                    "list",
                    self.root.display().to_string(),
                    e,
                ))
            }
        };

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry
                .map_err(|e| ProjmanError::persistence("list", self.root.display().to_string(), e))?;
            let path = entry.path();
            if !path.is_dir() {
                debug!("Skipping non-directory entry {}", path.display());
                continue;
            }
            let record = path.join(RECORD_FILE);
            if record.is_file() {
                files.push(record);
            } else {
                debug!("Skipping directory without a record: {}", path.display());
            }
        }
        files.sort();
        Ok(files)
    }
}

impl ProjectStore for FileStore {
    fn save(&self, project: &Project) -> Result<()> {
        let key = storage_key(project.name());
        let dir = self.root.join(&key);
        let io_err = |e: std::io::Error| ProjmanError::persistence("save", key.clone(), e);

        fs::create_dir_all(&dir).map_err(io_err)?;

        let lock_file = File::create(Self::lock_path(&dir)).map_err(io_err)?;
        FileExt::lock_exclusive(&lock_file).map_err(io_err)?;

        let json = serde_json::to_string_pretty(&StoredProject::from(project))?;

        let tmp_path = Self::tmp_path(&dir);
        let mut tmp_file = File::create(&tmp_path).map_err(io_err)?;
        tmp_file.write_all(json.as_bytes()).map_err(io_err)?;
        tmp_file.sync_all().map_err(io_err)?;
        drop(tmp_file);

        fs::rename(&tmp_path, dir.join(RECORD_FILE)).map_err(io_err)?;

        debug!(key = %key, tasks = project.task_count(), "Saved project record");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Project> {
        let path = self.record_path(name);
        let project = Self::read_record(&path)?.ok_or_else(|| ProjmanError::project_not_found(name))?;

        // Sanitization is not injective; a different name may own this key.
        if !project.has_name(name.trim()) {
            return Err(ProjmanError::project_not_found(name));
        }

        debug!(key = %storage_key(name), "Loaded project record");
        Ok(project)
    }

    fn load_all(&self) -> Result<Vec<Project>> {
        let mut projects = Vec::new();
        for path in self.record_files()? {
            match Self::read_record(&path) {
                Ok(Some(project)) => projects.push(project),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable project record: {}", e),
            }
        }
        sort_projects(&mut projects);
        debug!(count = projects.len(), root = %self.root.display(), "Loaded all projects");
        Ok(projects)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let key = storage_key(name);
        let dir = self.root.join(&key);

        // Same ownership check as `load`: never remove another name's record.
        match Self::read_record(&dir.join(RECORD_FILE))? {
            Some(project) if project.has_name(name.trim()) => {}
            _ => return Err(ProjmanError::project_not_found(name)),
        }

        fs::remove_dir_all(&dir).map_err(|e| ProjmanError::persistence("delete", key.clone(), e))?;
        debug!(key = %key, "Deleted project record");
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        matches!(
            Self::read_record(&self.record_path(name)),
            Ok(Some(project)) if project.has_name(name.trim())
        )
    }

    fn list_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for path in self.record_files()? {
            match Self::read_record(&path) {
                Ok(Some(project)) => names.push(project.name().to_string()),
                Ok(None) => {}
                Err(e) => debug!("Ignoring unreadable record while listing: {}", e),
            }
        }
        Ok(names)
    }
}
