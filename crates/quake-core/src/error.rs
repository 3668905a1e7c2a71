use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the quakefeed crates.
#[derive(Error, Debug)]
pub enum QuakeError {
    /// A feed file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The feed document parsed as JSON but is not a feature collection.
    #[error("Invalid feed payload: {0}")]
    InvalidPayload(String),

    /// A band boundary list is empty of meaning: non-finite or not ascending.
    #[error("Invalid band boundaries: {0}")]
    InvalidBands(String),

    /// A year filter string is neither "all" nor a 4-digit year.
    #[error("Invalid year filter: {0}")]
    InvalidYearFilter(String),

    /// The remote feed could not be retrieved.
    #[error("Feed fetch failed: {0}")]
    Fetch(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the quakefeed crates.
pub type Result<T> = std::result::Result<T, QuakeError>;
