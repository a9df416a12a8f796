//! Error types for the gridlearn crate

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the gridlearn crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("evaluation requires a trained value table, but none was provided")]
    MissingModel,

    #[error("no saved value table found at {}", path.display())]
    ModelNotFound { path: PathBuf },

    #[error("episode count must be positive (got {count})")]
    InvalidEpisodeCount { count: usize },

    #[error("action index {action} is out of range (environment has {available} actions)")]
    InvalidAction { action: usize, available: usize },

    #[error("state index {state} is out of range (table has {available} states)")]
    InvalidState { state: usize, available: usize },

    #[error("value table is {rows}x{columns}, environment expects {expected_rows}x{expected_columns}")]
    DimensionMismatch {
        rows: usize,
        columns: usize,
        expected_rows: usize,
        expected_columns: usize,
    },

    #[error("lake map must not be empty")]
    EmptyMap,

    #[error("lake map row {row} has {got} tiles, expected {expected}")]
    RaggedMapRow {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid tile '{character}' at row {row}, column {column}")]
    InvalidMapCharacter {
        character: char,
        row: usize,
        column: usize,
    },

    #[error("lake map must contain exactly one start tile (found {found})")]
    InvalidStartCount { found: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("unsupported save format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
