//! Capture manifests
//!
//! A capture manifest is a TOML file standing in for a live capture host:
//!
//! ```toml
//! [[transaction]]
//! url = "https://api.example.com/login"
//! method = "POST"
//! protocol = "https"
//! host = "api.example.com"
//! port = 443
//! capture_time = 1700000000000
//! request = "POST /login HTTP/1.1\r\nHost: api.example.com\r\n\r\n"
//! response = "HTTP/1.1 200 OK\r\n\r\n"
//! comment = "auth"
//! ```
//!
//! Entry order is the selection order.

use std::path::Path;

use serde::Deserialize;

use crate::transaction::{HttpService, Transaction};
use crate::{HistexError, Result};

#[derive(Debug, Deserialize)]
struct CaptureFile {
    #[serde(default, rename = "transaction")]
    transactions: Vec<CaptureEntry>,
}

#[derive(Debug, Deserialize)]
struct CaptureEntry {
    url: String,
    method: String,
    #[serde(default = "default_http")]
    protocol: String,
    host: String,
    port: u16,
    capture_time: u64,
    #[serde(default)]
    request: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

fn default_http() -> String {
    "http".to_string()
}

impl From<CaptureEntry> for Transaction {
    fn from(entry: CaptureEntry) -> Self {
        Self {
            request: entry.request.map(Into::into),
            response: entry.response.map(Into::into),
            url: entry.url,
            method: entry.method,
            service: HttpService::new(entry.protocol, entry.host, entry.port),
            capture_time: entry.capture_time,
            comment: entry.comment,
        }
    }
}

/// Load transactions from a capture manifest
///
/// # Errors
///
/// Returns error if the file cannot be read or is not a valid manifest
pub fn load(path: &Path) -> Result<Vec<Transaction>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        HistexError::InvalidCapture(format!("Failed to read {}: {e}", path.display()))
    })?;
    parse(&content)
}

/// Parse transactions from manifest text
///
/// # Errors
///
/// Returns error if the text is not a valid manifest
pub fn parse(content: &str) -> Result<Vec<Transaction>> {
    let file: CaptureFile = toml::from_str(content)
        .map_err(|e| HistexError::InvalidCapture(format!("Failed to parse manifest: {e}")))?;

    for (i, entry) in file.transactions.iter().enumerate() {
        if entry.host.is_empty() {
            return Err(HistexError::InvalidCapture(format!(
                "Transaction {i}: host cannot be empty"
            )));
        }

        if entry.port == 0 {
            return Err(HistexError::InvalidCapture(format!(
                "Transaction {i}: port cannot be 0"
            )));
        }
    }

    Ok(file.transactions.into_iter().map(Transaction::from).collect())
}
