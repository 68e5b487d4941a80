#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Occurrence record loading and storage.
//!
//! The loader is the sanitizing collaborator the core pipeline assumes:
//! it parses a delimited text export (semicolon-delimited and latin1
//! encoded in the original dataset), coerces missing or non-numeric
//! individual counts to 0, rejects rows without a country code or a
//! parseable year, and reports what it dropped. Everything downstream
//! can then treat the records as clean.
//!
//! [`store::RecordStore`] holds the loaded records as an immutable
//! snapshot half for the lifetime of a rendering cycle.

pub mod loader;
pub mod store;

use thiserror::Error;

/// Errors that can occur while loading occurrence records.
#[derive(Debug, Error)]
pub enum OccurrenceLoadError {
    /// I/O error (file read, gzip decompression).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks a required column.
    #[error("missing required column '{column}' in occurrence CSV header")]
    MissingColumn {
        /// Name of the absent column.
        column: String,
    },
}
