use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the search-stats crates.
#[derive(Error, Debug)]
pub enum StatsError {
    /// The input file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV framing was malformed or the data was not valid UTF-8.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The header row lacks one of the required columns.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A non-empty position value could not be parsed under the strict policy.
    #[error("Invalid position {value:?} on line {line}")]
    InvalidPosition { line: usize, value: String },

    /// A report could not be serialised to JSON.
    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A running click or impression total exceeded `u64::MAX`.
    #[error("Total {column} overflowed on line {line}")]
    CountOverflow { line: usize, column: &'static str },
}

/// Convenience alias used throughout the search-stats crates.
pub type Result<T> = std::result::Result<T, StatsError>;
