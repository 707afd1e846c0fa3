use core_types::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Invalid storage key '{0}': keys must be non-empty and contain no path separators")]
    InvalidKey(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("An error occurred during JSON serialization/deserialization: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Stored document under '{key}' holds an invalid value: {source}")]
    InvalidDocument {
        key: String,
        #[source]
        source: CoreError,
    },
}
