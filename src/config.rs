//! Configuration types for Histex

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::export::{ExportOptions, DEFAULT_WORKERS};
use crate::format::Decoding;
use crate::identifier::IdentityScope;
use crate::state::FileDirectoryStore;
use crate::{HistexError, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// File remembering the last export directory
    ///
    /// Defaults to `<config dir>/histex/state.toml`
    #[serde(default)]
    pub state_file: Option<PathBuf>,
    /// Export behaviour
    #[serde(default)]
    pub export: ExportConfig,
    /// Identifier digest inputs
    #[serde(default)]
    pub identity: IdentityScope,
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Concurrent file writes (1 writes sequentially)
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Pad order numbers in file names
    #[serde(default)]
    pub zero_pad_order: bool,
    /// Payload decoding
    #[serde(default)]
    pub decoding: Decoding,
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            zero_pad_order: false,
            decoding: Decoding::default(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| HistexError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| HistexError::ConfigError(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<()> {
        if self.export.workers == 0 {
            return Err(HistexError::ConfigError(
                "export.workers must be > 0".to_string(),
            ));
        }

        if let Some(state_file) = &self.state_file {
            if state_file.as_os_str().is_empty() {
                return Err(HistexError::ConfigError(
                    "state_file cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Options for an [`crate::export::Exporter`]
    #[must_use]
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            identity: self.identity,
            decoding: self.export.decoding,
            zero_pad_order: self.export.zero_pad_order,
            workers: self.export.workers,
        }
    }

    /// Directory store at the configured (or default) state file
    ///
    /// # Errors
    ///
    /// Returns error if no state file is configured and the platform config
    /// directory cannot be determined
    pub fn directory_store(&self) -> Result<FileDirectoryStore> {
        let path = match &self.state_file {
            Some(path) => path.clone(),
            None => FileDirectoryStore::default_path()?,
        };
        Ok(FileDirectoryStore::new(path))
    }
}
