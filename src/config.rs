//! Configuration for projman.
//!
//! Settings live in a small TOML file:
//!
//! ```toml
//! [store]
//! root = "projects"
//! ```
//!
//! A relative `store.root` resolves against the directory holding the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ProjmanError, Result};

/// Store root used when nothing else is configured.
pub const DEFAULT_STORE_ROOT: &str = "projects";

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "projman.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    /// File this configuration was read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreConfig {
    #[serde(default)]
    pub root: Option<PathBuf>,
}

impl Config {
    /// Parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the file cannot be read or is not valid
    /// TOML for this schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ProjmanError::config_with_path(format!("cannot read config: {e}"), path.to_path_buf())
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            ProjmanError::config_with_path(format!("invalid config: {e}"), path.to_path_buf())
        })?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Load configuration the way the command line does.
    ///
    /// An `explicit` path must exist. Otherwise `./projman.toml` and then the
    /// user config file are tried, and defaults apply if neither exists.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error for a missing explicit file or any file that
    /// fails to parse.
    pub fn load(explicit: Option<&Path>, working_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ProjmanError::config_with_path(
                    "config file not found",
                    path.to_path_buf(),
                ));
            }
            return Self::from_file(path);
        }

        let candidates = [Some(working_dir.join(LOCAL_CONFIG_FILE)), Self::user_config_path()];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                tracing::debug!(path = %path.display(), "Using config file");
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// `<config dir>/projman/config.toml` for the current user.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("projman").join("config.toml"))
    }

    /// Pick the store root: an override (flag or environment) wins, then
    /// `store.root` from the file, then [`DEFAULT_STORE_ROOT`] under
    /// `working_dir`.
    pub fn store_root(&self, override_root: Option<&Path>, working_dir: &Path) -> PathBuf {
        if let Some(root) = override_root {
            return working_dir.join(root);
        }
        match (&self.store.root, &self.source) {
            (Some(root), Some(source)) => {
                let base = source.parent().unwrap_or(working_dir);
                working_dir.join(base).join(root)
            }
            (Some(root), None) => working_dir.join(root),
            (None, _) => working_dir.join(DEFAULT_STORE_ROOT),
        }
    }
}
