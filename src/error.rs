use std::path::PathBuf;
use thiserror::Error;

/// Failures of the underlying key-value storage
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed storage file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl<T> From<std::sync::PoisonError<T>> for BlobError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// Failures of saving or loading the shopping list
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Storage error: {0}")]
    Storage(#[from] BlobError),

    #[error("Failed to serialize shopping items: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Stored shopping items are corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
