use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub export: ExportSettings,
}

/// Which blob store backs the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key inside `storage.directory`.
    File,
    /// Kept in memory only; nothing survives the process.
    Memory,
}

/// Where and under which key the ledger is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory of the file backend.
    pub directory: PathBuf,
    /// The application key the ledger document is stored under.
    pub key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    /// Default filter directive, e.g. "info" or "engine=debug". `RUST_LOG` wins when set.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    /// Directory CSV exports are written to.
    pub directory: PathBuf,
}
