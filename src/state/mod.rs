//! Memory of the last export directory
//!
//! The coordinator reads the store at most once at the start of an export and
//! writes it at most once at the end. Implementations serialize access
//! internally so concurrent exports cannot interleave a read and a write.

mod file;
mod memory;

use std::path::{Path, PathBuf};

pub use file::FileDirectoryStore;
pub use memory::MemoryDirectoryStore;

use crate::Result;

/// Persisted "last export directory" setting
pub trait DirectoryStore: Send + Sync {
    /// Last successfully used directory, `None` if never set
    ///
    /// # Errors
    ///
    /// Returns error if the backing storage cannot be read
    fn read(&self) -> Result<Option<PathBuf>>;

    /// Remember `path` for future reads
    ///
    /// # Errors
    ///
    /// Returns error if the backing storage cannot be written
    fn write(&self, path: &Path) -> Result<()>;
}

impl<S: DirectoryStore + ?Sized> DirectoryStore for std::sync::Arc<S> {
    fn read(&self) -> Result<Option<PathBuf>> {
        (**self).read()
    }

    fn write(&self, path: &Path) -> Result<()> {
        (**self).write(path)
    }
}
