//! In-process directory store

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::DirectoryStore;
use crate::Result;

/// Directory store that lives as long as the hosting process
#[derive(Debug, Default)]
pub struct MemoryDirectoryStore {
    last_dir: Mutex<Option<PathBuf>>,
}

impl MemoryDirectoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already remembers `path`
    #[must_use]
    pub fn with_directory(path: impl Into<PathBuf>) -> Self {
        Self {
            last_dir: Mutex::new(Some(path.into())),
        }
    }
}

impl DirectoryStore for MemoryDirectoryStore {
    fn read(&self) -> Result<Option<PathBuf>> {
        let guard = self.last_dir.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn write(&self, path: &Path) -> Result<()> {
        let mut guard = self.last_dir.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_unset() {
        let store = MemoryDirectoryStore::new();
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryDirectoryStore::new();
        store.write(Path::new("/tmp/exports")).unwrap();
        assert_eq!(store.read().unwrap(), Some(PathBuf::from("/tmp/exports")));

        store.write(Path::new("/tmp/other")).unwrap();
        assert_eq!(store.read().unwrap(), Some(PathBuf::from("/tmp/other")));
    }

    #[test]
    fn test_seeded_store() {
        let store = MemoryDirectoryStore::with_directory("/srv/reports");
        assert_eq!(store.read().unwrap(), Some(PathBuf::from("/srv/reports")));
    }
}
