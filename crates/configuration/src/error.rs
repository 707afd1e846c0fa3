use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings (file: {}): {source}", .path.display())]
    LoadError {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("Invalid setting `{key}`: {reason}")]
    ValidationError { key: &'static str, reason: String },
}
