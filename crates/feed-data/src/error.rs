//! Error types for the feed-data crate.
//!
//! All failures during snapshot loading and indexing are reported
//! through `FeedLoadError`. The recommendation core itself never
//! produces errors; only the loading path does.

use thiserror::Error;

/// Errors that can occur while loading and indexing a feed snapshot
#[derive(Error, Debug)]
pub enum FeedLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a snapshot file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Snapshot file is not valid JSON for the expected shape
    #[error("JSON error in {file}: {source}")]
    JsonError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two records in the same snapshot share an identifier
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    /// Referenced entity doesn't exist (e.g., post authored by an unknown user)
    #[error("Missing reference: {entity} with id {id}")]
    MissingReference { entity: &'static str, id: String },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, FeedLoadError>;
