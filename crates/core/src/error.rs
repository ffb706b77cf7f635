// ABOUTME: Error types for coercion and dataset parsing.
// ABOUTME: CoerceError for malformed dates, DatasetError for open/read failures and malformed rows.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::schema::Dataset;

/// Errors raised by the converting (`to_*`) coercion functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoerceError {
    /// The value was present but matched none of the accepted date shapes.
    #[error("cannot convert {0:?} to a date")]
    InvalidDate(String),
}

/// Errors that can occur while parsing a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The dataset file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading or decoding a line failed part way through the file.
    #[error("failed to read line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A row did not have the dataset's exact column count. Fatal for the parse.
    #[error("invalid {dataset} format at line {line}: expected {expected} columns, found {found}")]
    InvalidFormat {
        dataset: Dataset,
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl DatasetError {
    /// Returns true if this is a malformed-row error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, DatasetError::InvalidFormat { .. })
    }

    /// Returns true if this error came from the filesystem or decoder.
    pub fn is_io(&self) -> bool {
        matches!(self, DatasetError::Open { .. } | DatasetError::Read { .. })
    }
}
