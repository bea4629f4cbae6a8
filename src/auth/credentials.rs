//! Credential storage
//!
//! The CLI keeps the API key in `$XDG_CONFIG_HOME/trusttrack/auth.json`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read, persist and remove the current credential
pub trait CredentialStore {
    /// The stored API key, if any
    fn load(&self) -> Result<Option<String>>;

    /// Persist `api_key`, replacing any stored value
    fn save(&self, api_key: &str) -> Result<()>;

    /// Remove the stored credential
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Serialize, Deserialize)]
struct CredentialFile {
    api_key: String,
}

/// JSON file credential store
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store credentials at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store credentials at the XDG config location
    pub fn from_xdg() -> Result<Self> {
        let dirs = xdg::BaseDirectories::with_prefix("trusttrack")
            .map_err(|e| Error::credentials(format!("cannot resolve config directory: {e}")))?;
        Ok(Self::new(dirs.get_config_home().join("auth.json")))
    }

    /// Location of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: CredentialFile = serde_json::from_slice(&data).map_err(|e| {
            Error::credentials(format!("invalid credential file {}: {e}", self.path.display()))
        })?;
        Ok(Some(file.api_key).filter(|key| !key.is_empty()))
    }

    fn save(&self, api_key: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&CredentialFile {
            api_key: api_key.to_string(),
        })
        .map_err(|e| Error::credentials(e.to_string()))?;
        write_private(&self.path, &data)?;
        debug!("Saved credentials to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed credentials at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(path, data)
}
