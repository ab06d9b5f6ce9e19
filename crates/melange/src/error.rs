//! Error types for the Melange library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Melange operations.
#[derive(Debug, Error)]
pub enum MelangeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A column required by an operation is missing from a table.
    #[error("Column '{column}' not found in table '{table}'")]
    ColumnNotFound { column: String, table: String },

    /// Join was requested with the wrong number of tables.
    #[error("Join requires exactly 2 tables, got {got}")]
    MergeArity { got: usize },

    /// A recipe failed validation (blank name, join without a key, ...).
    #[error("Invalid recipe: {0}")]
    InvalidRecipe(String),

    /// The key-value backend failed to read or write.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Empty file or no tables to operate on.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Failure while serializing a table for export.
    #[error("Export error: {0}")]
    Export(String),

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Melange operations.
pub type Result<T> = std::result::Result<T, MelangeError>;
