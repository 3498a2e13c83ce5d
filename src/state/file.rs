//! Directory store persisted to a TOML state file

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::DirectoryStore;
use crate::{HistexError, Result};

/// Application name for the state directory
const APP_NAME: &str = "histex";

/// State file name
const STATE_FILE: &str = "state.toml";

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    last_export_dir: Option<PathBuf>,
}

/// Directory store backed by a small TOML file
///
/// A missing file reads as "never set".
#[derive(Debug)]
pub struct FileDirectoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileDirectoryStore {
    /// Create a store at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Default state file location
    ///
    /// Returns `~/.config/histex/state.toml` on Linux
    ///
    /// # Errors
    ///
    /// Returns error if the platform config directory cannot be determined
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| HistexError::State("Could not determine config directory".to_string()))?;
        Ok(config_dir.join(APP_NAME).join(STATE_FILE))
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<StateFile> {
        if !self.path.exists() {
            return Ok(StateFile::default());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            HistexError::State(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        toml::from_str(&contents).map_err(|e| {
            HistexError::State(format!("Failed to parse {}: {e}", self.path.display()))
        })
    }
}

impl DirectoryStore for FileDirectoryStore {
    fn read(&self) -> Result<Option<PathBuf>> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.last_export_dir)
    }

    fn write(&self, path: &Path) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        // The file holds nothing else, so unreadable contents are replaced
        if let Err(e) = self.load() {
            warn!("Overwriting unreadable state file: {e}");
        }
        let state = StateFile {
            last_export_dir: Some(path.to_path_buf()),
        };

        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(&state)
            .map_err(|e| HistexError::State(format!("Failed to serialize state: {e}")))?;

        // Write a sibling file and rename it over the old one
        let mut staged = NamedTempFile::new_in(parent)?;
        staged.write_all(contents.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|e| {
            HistexError::State(format!("Failed to write {}: {}", self.path.display(), e.error))
        })?;

        debug!(
            "Remembered export directory {} in {}",
            path.display(),
            self.path.display()
        );
        Ok(())
    }
}
