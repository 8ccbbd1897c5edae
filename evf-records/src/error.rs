/// Error types for dataset loading
use thiserror::Error;

/// Main error type for loading the dashboard's source datasets.
///
/// Every variant is fatal for the dataset it concerns: the sources are
/// static local files, so a failed load is surfaced, not retried.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Source file could not be read
    #[error("Failed to read source '{source_name}': {err}")]
    Io {
        source_name: String,
        #[source]
        err: std::io::Error,
    },

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Header row lacks a configured column
    #[error("Source '{source_name}' is missing required column '{column}'")]
    MissingColumn {
        source_name: String,
        column: String,
    },

    /// A field that must parse (e.g. a registration year) did not
    #[error("Source '{source_name}' row {row}: invalid value '{value}' for column '{column}'")]
    InvalidField {
        source_name: String,
        row: usize,
        column: String,
        value: String,
    },
}

/// Type alias for Results using LoadError
pub type Result<T> = std::result::Result<T, LoadError>;
