//! Error types for the data-loader crate.

use thiserror::Error;

/// Errors that can occur while loading, validating or saving movie data
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Dataset file is not valid JSON for the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record lacks a field that cannot be defaulted (id or title)
    #[error("Invalid record: {reason}")]
    InvalidRecord { reason: String },

    /// Record at a given position in a dataset file failed validation
    #[error("Invalid record #{index} in {file}: {reason}")]
    InvalidDatasetEntry {
        file: String,
        index: usize,
        reason: String,
    },

    /// A data field had an invalid value
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Two records share the same id
    #[error("Duplicate movie id {id}")]
    DuplicateId { id: u32 },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
