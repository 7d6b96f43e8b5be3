//! Optional user configuration.
//!
//! Read from `<config dir>/pagespeed/config.toml` when present. Every field has a
//! default, so a missing file is the same as an empty one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::args::Strategy;
use crate::constants;
use crate::error::ConfigError;

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base URL of the `runPagespeed` API.
    pub endpoint: String,
    /// Strategy used when `-s` is not given.
    pub strategy: Strategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: constants::DEFAULT_API_ENDPOINT.to_string(),
            strategy: Strategy::default(),
        }
    }
}

impl Config {
    /// Standard config file location, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(constants::CONFIG_DIR_NAME)
                .join(constants::CONFIG_FILE_NAME)
        })
    }

    /// Loads the config from the standard location and applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        if let Ok(endpoint) = std::env::var(constants::ENV_ENDPOINT) {
            if !endpoint.trim().is_empty() {
                debug!(%endpoint, "endpoint overridden from environment");
                config.endpoint = endpoint.trim().to_string();
            }
        }
        Ok(config)
    }

    /// Loads the config at `path`, falling back to defaults when it is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }
}
