use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, ExportSettings, LoggingSettings, StorageBackend, StorageSettings};

/// The configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "commission.toml";

/// Default application key of the persisted ledger.
pub const DEFAULT_STORAGE_KEY: &str = "gestorComisiones";

/// Prefix of environment variable overrides, e.g. `COMMISSION__STORAGE__KEY`.
pub const ENV_PREFIX: &str = "COMMISSION";

/// Loads the application configuration from `commission.toml` and the environment.
///
/// This function is the primary entry point for this crate. The file is optional;
/// every setting has a default.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new(CONFIG_FILE))
}

/// Same as [`load_config`] with an explicit configuration file path.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let load_error = |source| ConfigError::LoadError {
        path: path.to_path_buf(),
        source,
    };

    let builder = config::Config::builder()
        .set_default("storage.backend", "file")
        .and_then(|b| b.set_default("storage.directory", "data"))
        .and_then(|b| b.set_default("storage.key", DEFAULT_STORAGE_KEY))
        .and_then(|b| b.set_default("logging.level", "info"))
        .and_then(|b| b.set_default("export.directory", "."))
        .map_err(load_error)?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .map_err(load_error)?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>().map_err(load_error)?;
    validate(&config)?;

    tracing::debug!(?config, "Configuration loaded.");
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.storage.key.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            key: "storage.key",
            reason: "must not be empty".to_string(),
        });
    }
    if config.logging.level.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            key: "logging.level",
            reason: "must not be empty".to_string(),
        });
    }
    Ok(())
}
