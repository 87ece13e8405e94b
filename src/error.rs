//! Error types for the contact-curate library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum CurateError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed path '{path}': {reason}")]
    MalformedPath { path: PathBuf, reason: String },

    #[error("Missing required column '{column}' in {path}")]
    SchemaMismatch { path: PathBuf, column: String },

    #[error("Empty data: {0}")]
    EmptyData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, CurateError>;
