//! Configuration loading utilities

use crate::schema::{Config, StoreBackend};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "SPINEMOTION_CONFIG_PATH";

/// Files probed in the working directory when no path is given.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["spinemotion.yaml", "spinemotion.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse { var: String, message: String },
}

impl From<ConfigError> for spinemotion_common::DashboardError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        Self::config_with_source(message, err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, probing the usual locations.
    ///
    /// Order: `explicit`, then `SPINEMOTION_CONFIG_PATH`, then `spinemotion.yaml` /
    /// `spinemotion.yml` in the working directory, then built-in defaults.
    /// Environment overrides are applied last and the result is validated.
    pub fn load(explicit: Option<&Path>) -> spinemotion_common::Result<Config> {
        Self::load_path(Self::resolve_path(explicit).as_deref())
    }

    /// Configuration file [`ConfigLoader::load`] would read, if any.
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from))
            .or_else(|| {
                DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            })
    }

    /// Load an already resolved file, or the defaults when `path` is `None`,
    /// then apply environment overrides and validate.
    pub fn load_path(path: Option<&Path>) -> spinemotion_common::Result<Config> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => Config::default(),
        };

        Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a specific file, without env overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> spinemotion_common::Result<Config> {
        let config = Self::read_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        // An empty document deserializes to unit, not to a defaulted struct.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("SPINEMOTION_STORE_BACKEND") {
            config.store.backend = match backend.trim().to_ascii_lowercase().as_str() {
                "file" => StoreBackend::File,
                "http" => StoreBackend::Http,
                other => {
                    return Err(ConfigError::EnvParse {
                        var: "SPINEMOTION_STORE_BACKEND".to_string(),
                        message: format!("unknown backend '{other}', expected file or http"),
                    })
                }
            };
        }

        if let Some(uri) = lookup("SPINEMOTION_STORE_URI") {
            config.store.uri = uri;
        }

        if let Some(database) = lookup("SPINEMOTION_DATABASE") {
            config.store.database = database;
        }

        if let Some(collection) = lookup("SPINEMOTION_COLLECTION") {
            config.store.collection = collection;
        }

        if let Some(timeout) = lookup("SPINEMOTION_STORE_TIMEOUT") {
            config.store.timeout_seconds =
                timeout.trim().parse().map_err(|e| ConfigError::EnvParse {
                    var: "SPINEMOTION_STORE_TIMEOUT".to_string(),
                    message: format!("{e}"),
                })?;
        }

        if let Some(timezone) = lookup("SPINEMOTION_TIMEZONE") {
            config.features.timezone = timezone;
        }

        if let Some(locale) = lookup("SPINEMOTION_LOCALE") {
            config.display.locale = locale;
        }

        if let Some(level) = lookup("SPINEMOTION_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
