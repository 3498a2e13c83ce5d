//! Histex - export captured HTTP proxy history to text files
//!
//! A selection of captured transactions is ordered by capture time, tagged
//! with a short content hash and rendered into one self-contained text file
//! per item, named `<order>_request_<identifier>.txt`.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod capture;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod identifier;
pub mod ordering;
pub mod state;
pub mod transaction;

pub use error::{HistexError, Result};
