//! Context-menu commands offered for a history selection
//!
//! The host's menu toolkit only needs to show [`menu_items`] and call [`run`]
//! with the chosen command. Directory selection is delegated to a
//! [`DirectoryPrompt`] so the flow can run without any UI.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::export::{Destination, ExportReport, Exporter};
use crate::state::DirectoryStore;
use crate::transaction::HttpTransaction;
use crate::Result;

/// Tooltip shown when no directory has been remembered yet
pub const NO_PREVIOUS_DIRECTORY: &str = "No previous directory";

/// Export commands offered on a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Ask for a directory, then export into it
    ExportToDirectory,
    /// Export into the remembered directory
    ExportToLastDirectory,
}

impl MenuCommand {
    /// Menu label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::ExportToDirectory => "Export to directory...",
            MenuCommand::ExportToLastDirectory => "Export to last dir",
        }
    }
}

/// One entry of the context menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Command run when the entry is chosen
    pub command: MenuCommand,
    /// Display label
    pub label: &'static str,
    /// Hover text
    pub tooltip: Option<String>,
}

/// Directory chooser supplied by the host UI
pub trait DirectoryPrompt {
    /// Ask the user for a directory, starting at `start` when given
    ///
    /// Returns `None` if the user cancelled.
    fn choose_directory(&self, start: Option<&Path>) -> Option<PathBuf>;
}

impl<F> DirectoryPrompt for F
where
    F: Fn(Option<&Path>) -> Option<PathBuf>,
{
    fn choose_directory(&self, start: Option<&Path>) -> Option<PathBuf> {
        self(start)
    }
}

/// Build the context menu entries
///
/// # Errors
///
/// Returns error if the directory store cannot be read
pub fn menu_items<S: DirectoryStore + ?Sized>(store: &S) -> Result<Vec<MenuItem>> {
    let last_dir = store.read()?;

    Ok(vec![
        MenuItem {
            command: MenuCommand::ExportToDirectory,
            label: MenuCommand::ExportToDirectory.label(),
            tooltip: None,
        },
        MenuItem {
            command: MenuCommand::ExportToLastDirectory,
            label: MenuCommand::ExportToLastDirectory.label(),
            tooltip: Some(last_dir.map_or_else(
                || NO_PREVIOUS_DIRECTORY.to_string(),
                |dir| dir.display().to_string(),
            )),
        },
    ])
}

/// Run a menu command over the current selection
///
/// Returns `Ok(None)` when the directory prompt was cancelled.
///
/// # Errors
///
/// Returns error if the export cannot start, see [`Exporter::export`]
pub fn run<S, T, P>(
    exporter: &Exporter<S>,
    command: MenuCommand,
    selection: &[T],
    prompt: &P,
) -> Result<Option<ExportReport>>
where
    S: DirectoryStore,
    T: HttpTransaction,
    P: DirectoryPrompt + ?Sized,
{
    let destination = match command {
        MenuCommand::ExportToDirectory => {
            let start = exporter.store().read()?;
            match prompt.choose_directory(start.as_deref()) {
                Some(dir) => Destination::Directory(dir),
                None => {
                    debug!("Directory prompt cancelled");
                    return Ok(None);
                }
            }
        }
        MenuCommand::ExportToLastDirectory => Destination::LastDirectory,
    };

    exporter.export(selection, destination).map(Some)
}
