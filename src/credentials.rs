//! API key storage.
//!
//! The key lives in a single plaintext file, `~/.pagespeed_api_key`. The store
//! is constructed with an explicit path so callers (and tests) decide where
//! that file is; [`CredentialStore::from_home`] gives the standard location.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants;
use crate::error::CredentialError;

/// Reads and writes the API key file.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store backed by `$HOME/.pagespeed_api_key`.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::NoHome`] if the home directory is unknown.
    pub fn from_home() -> Result<Self, CredentialError> {
        home_dir()
            .map(|home| Self::new(home.join(constants::KEY_FILE_NAME)))
            .ok_or(CredentialError::NoHome)
    }

    /// Location of the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored key with all whitespace removed.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Missing`] when the file does not exist or holds
    /// only whitespace, and [`CredentialError::Io`] for any other read failure.
    pub fn get_key(&self) -> Result<String, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(CredentialError::Missing {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(CredentialError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let key: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        if key.is_empty() {
            return Err(CredentialError::Missing {
                path: self.path.clone(),
            });
        }

        debug!(path = %self.path.display(), "loaded API key");
        Ok(key)
    }

    /// Writes `key` verbatim, replacing any previous content.
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::Io`] if the file cannot be written.
    pub fn save_key(&self, key: &str) -> Result<(), CredentialError> {
        let io_err = |source| CredentialError::Io {
            path: self.path.clone(),
            source,
        };

        fs::write(&self.path, key).map_err(io_err)?;

        // Secure the file (chmod 600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.path).map_err(io_err)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms).map_err(io_err)?;
        }

        debug!(path = %self.path.display(), "saved API key");
        Ok(())
    }
}

/// `$HOME` when set, otherwise the platform's notion of the home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
