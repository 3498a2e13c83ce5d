//! Export summary

use std::fmt;
use std::path::{Path, PathBuf};

use super::ItemOutcome;

/// Outcome of one export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// Directory the batch was written to
    pub destination: PathBuf,
    /// Per-item outcomes, in order number sequence
    pub outcomes: Vec<ItemOutcome>,
    /// Whether the destination was stored as the last export directory
    pub directory_remembered: bool,
}

impl ExportReport {
    pub(crate) fn empty(destination: PathBuf) -> Self {
        Self {
            destination,
            outcomes: Vec::new(),
            directory_remembered: false,
        }
    }

    /// Destination directory
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Number of items in the batch
    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of files written
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of failed items
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    /// Failed items
    pub fn failures(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// True when nothing was selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl fmt::Display for ExportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exported {} item(s) to:\n{}",
            self.succeeded(),
            self.destination.display()
        )?;

        if self.failed() > 0 {
            write!(f, "\n\nFailed: {} item(s)", self.failed())?;
            for outcome in self.failures() {
                write!(
                    f,
                    "\n  #{} [{}] {}: {}",
                    outcome.order,
                    outcome.identifier,
                    outcome.file_name,
                    outcome.failure_reason().unwrap_or_default()
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::ItemStatus;
    use crate::identifier::{identify, IdentityScope};
    use crate::transaction::{HttpService, Transaction};

    fn outcome(order: usize, status: ItemStatus) -> ItemOutcome {
        let tx = Transaction::new(
            "GET",
            "http://example.com/",
            HttpService::new("http", "example.com", 80),
            1,
            format!("GET /{order} HTTP/1.1\r\n\r\n").into_bytes(),
        );
        let identifier = identify(&tx, IdentityScope::default());
        ItemOutcome {
            order,
            identifier,
            file_name: format!("{order}_request_{identifier}.txt"),
            status,
        }
    }

    #[test]
    fn test_summary_all_written() {
        let report = ExportReport {
            destination: PathBuf::from("/srv/exports"),
            outcomes: vec![outcome(
                1,
                ItemStatus::Written {
                    path: PathBuf::from("/srv/exports/1.txt"),
                },
            )],
            directory_remembered: true,
        };

        assert_eq!(report.to_string(), "Exported 1 item(s) to:\n/srv/exports");
    }

    #[test]
    fn test_summary_with_failures() {
        let report = ExportReport {
            destination: PathBuf::from("/srv/exports"),
            outcomes: vec![
                outcome(
                    1,
                    ItemStatus::Written {
                        path: PathBuf::from("/srv/exports/1.txt"),
                    },
                ),
                outcome(
                    2,
                    ItemStatus::Failed {
                        reason: "No space left on device".to_string(),
                    },
                ),
            ],
            directory_remembered: true,
        };

        assert_eq!(report.total(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);

        let text = report.to_string();
        assert!(text.starts_with("Exported 1 item(s) to:\n/srv/exports\n\nFailed: 1 item(s)"));
        assert!(text.contains("#2 ["));
        assert!(text.ends_with(": No space left on device"));
    }
}
