//! Batch export of selected transactions to text files

mod coordinator;
mod report;

use std::path::PathBuf;

pub use coordinator::Exporter;
pub use report::ExportReport;

use crate::format::Decoding;
use crate::identifier::{IdentityScope, Identifier};

/// Default number of concurrent file writes
pub const DEFAULT_WORKERS: usize = 4;

/// Where an export writes its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// A freshly chosen directory, remembered once a write succeeds
    Directory(PathBuf),
    /// The directory remembered from the last successful export
    LastDirectory,
}

/// Knobs that shape an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Parts of a transaction hashed into its identifier
    pub identity: IdentityScope,
    /// Payload text decoding
    pub decoding: Decoding,
    /// Pad order numbers in file names to the width of the batch size
    pub zero_pad_order: bool,
    /// Concurrent writes in [`Exporter::export_concurrent`]
    pub workers: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            identity: IdentityScope::default(),
            decoding: Decoding::default(),
            zero_pad_order: false,
            workers: DEFAULT_WORKERS,
        }
    }
}

/// One rendered transaction, ready to be written
#[derive(Debug, Clone)]
pub struct ExportRecord {
    /// 1-based chronological position in the batch
    pub order: usize,
    /// Content identifier
    pub identifier: Identifier,
    /// Target file name inside the destination directory
    pub file_name: String,
    /// Rendered file body
    pub body: Vec<u8>,
}

/// Result of writing one record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    /// File written at `path`
    Written {
        /// Full path of the written file
        path: PathBuf,
    },
    /// File could not be written
    Failed {
        /// Human-readable cause
        reason: String,
    },
}

/// Per-item outcome reported back to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemOutcome {
    /// 1-based chronological position in the batch
    pub order: usize,
    /// Content identifier
    pub identifier: Identifier,
    /// Target file name
    pub file_name: String,
    /// Write result
    pub status: ItemStatus,
}

impl ItemOutcome {
    /// Whether the file was written
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.status, ItemStatus::Written { .. })
    }

    /// Failure reason, if the write failed
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.status {
            ItemStatus::Written { .. } => None,
            ItemStatus::Failed { reason } => Some(reason),
        }
    }
}

/// File name of an exported item: `<order>_request_<identifier>.txt`
///
/// `pad_width` of 0 writes the order number without leading zeros.
#[must_use]
pub fn file_name(order: usize, identifier: &Identifier, pad_width: usize) -> String {
    format!("{order:0pad_width$}_request_{identifier}.txt")
}
