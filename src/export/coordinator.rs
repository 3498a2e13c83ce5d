//! Export coordinator

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::format::render;
use crate::identifier::identify;
use crate::ordering::order;
use crate::state::DirectoryStore;
use crate::transaction::HttpTransaction;
use crate::{HistexError, Result};

use super::{
    file_name, Destination, ExportOptions, ExportRecord, ExportReport, ItemOutcome, ItemStatus,
};

/// Orders, renders and writes a selection of transactions
pub struct Exporter<S> {
    store: S,
    options: ExportOptions,
}

impl<S: DirectoryStore> Exporter<S> {
    /// Create an exporter backed by a directory store
    ///
    /// # Panics
    ///
    /// Panics if `options.workers` is 0
    pub fn new(store: S, options: ExportOptions) -> Self {
        assert!(options.workers > 0, "workers must be > 0");
        Self { store, options }
    }

    /// Directory store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Export options
    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export a selection, writing files one after another
    ///
    /// Every item is attempted; individual write failures are reported in
    /// the returned outcomes rather than aborting the batch.
    ///
    /// # Errors
    ///
    /// Returns [`HistexError::NoPriorDirectory`] for
    /// [`Destination::LastDirectory`] when no directory has been remembered,
    /// or an error if the destination cannot be resolved
    pub fn export<T: HttpTransaction>(
        &self,
        selection: &[T],
        destination: Destination,
    ) -> Result<ExportReport> {
        let (dir, remember) = self.resolve(destination)?;
        if selection.is_empty() {
            debug!("Empty selection, nothing to export");
            return Ok(ExportReport::empty(dir));
        }

        let records = self.records(selection);
        info!(
            "Exporting {} item(s) to {}",
            records.len(),
            dir.display()
        );

        let outcomes = records
            .into_iter()
            .map(|record| {
                let path = dir.join(&record.file_name);
                let result = fs::write(&path, &record.body);
                outcome(record, path, result)
            })
            .collect();

        Ok(self.finish(dir, remember, outcomes))
    }

    /// Export a selection, fanning writes out over a bounded worker pool
    ///
    /// At most `options.workers` writes run at once. The directory store is
    /// updated once, after every write has completed.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::export`]
    pub async fn export_concurrent<T: HttpTransaction>(
        &self,
        selection: &[T],
        destination: Destination,
    ) -> Result<ExportReport> {
        let (dir, remember) = self.resolve(destination)?;
        if selection.is_empty() {
            debug!("Empty selection, nothing to export");
            return Ok(ExportReport::empty(dir));
        }

        let records = self.records(selection);
        info!(
            "Exporting {} item(s) to {} ({} workers)",
            records.len(),
            dir.display(),
            self.options.workers
        );

        let pending: Vec<(usize, _, String)> = records
            .iter()
            .map(|r| (r.order, r.identifier, r.file_name.clone()))
            .collect();

        let limit = Arc::new(Semaphore::new(self.options.workers));
        let mut tasks = JoinSet::new();

        for record in records {
            let permit = Arc::clone(&limit)
                .acquire_owned()
                .await
                .map_err(|e| HistexError::Other(format!("Write pool closed: {e}")))?;
            let path = dir.join(&record.file_name);

            tasks.spawn(async move {
                let _permit = permit;
                let result = tokio::fs::write(&path, &record.body).await;
                outcome(record, path, result)
            });
        }

        let mut outcomes = Vec::with_capacity(pending.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(item) => outcomes.push(item),
                Err(e) => warn!("Write task failed: {e}"),
            }
        }

        // A task that died never produced an outcome; report it as failed
        let reported: BTreeSet<usize> = outcomes.iter().map(|o| o.order).collect();
        for (order, identifier, file_name) in pending {
            if !reported.contains(&order) {
                outcomes.push(ItemOutcome {
                    order,
                    identifier,
                    file_name,
                    status: ItemStatus::Failed {
                        reason: "Write task did not complete".to_string(),
                    },
                });
            }
        }
        outcomes.sort_by_key(|o| o.order);

        Ok(self.finish(dir, remember, outcomes))
    }

    /// Order, identify and render a selection without writing anything
    pub fn records<T: HttpTransaction>(&self, selection: &[T]) -> Vec<ExportRecord> {
        let pad_width = if self.options.zero_pad_order {
            selection.len().to_string().len()
        } else {
            0
        };

        order(selection)
            .into_iter()
            .map(|(order, tx)| {
                let identifier = identify(tx, self.options.identity);
                ExportRecord {
                    order,
                    identifier,
                    file_name: file_name(order, &identifier, pad_width),
                    body: render(order, &identifier, tx, self.options.decoding),
                }
            })
            .collect()
    }

    /// Resolve the target directory and whether it should be remembered
    fn resolve(&self, destination: Destination) -> Result<(PathBuf, bool)> {
        match destination {
            Destination::Directory(dir) => Ok((absolute(dir)?, true)),
            Destination::LastDirectory => {
                let dir = self.store.read()?.ok_or(HistexError::NoPriorDirectory)?;
                Ok((dir, false))
            }
        }
    }

    fn finish(&self, dir: PathBuf, remember: bool, outcomes: Vec<ItemOutcome>) -> ExportReport {
        let mut report = ExportReport {
            destination: dir,
            outcomes,
            directory_remembered: false,
        };

        if remember && report.succeeded() > 0 {
            match self.store.write(&report.destination) {
                Ok(()) => report.directory_remembered = true,
                Err(e) => warn!(
                    "Could not remember export directory {}: {e}",
                    report.destination.display()
                ),
            }
        }

        info!(
            "Export finished: {} written, {} failed",
            report.succeeded(),
            report.failed()
        );
        report
    }
}

fn absolute(dir: PathBuf) -> Result<PathBuf> {
    if dir.is_absolute() {
        Ok(dir)
    } else {
        Ok(std::env::current_dir()?.join(dir))
    }
}

fn outcome(record: ExportRecord, path: PathBuf, result: io::Result<()>) -> ItemOutcome {
    let status = match result {
        Ok(()) => {
            debug!("Exported: {}", record.file_name);
            ItemStatus::Written { path }
        }
        Err(e) => {
            warn!("Error exporting item {}: {e}", record.order);
            ItemStatus::Failed {
                reason: format!("{}: {e}", path.display()),
            }
        }
    };

    ItemOutcome {
        order: record.order,
        identifier: record.identifier,
        file_name: record.file_name,
        status,
    }
}
