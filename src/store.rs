// Credential store: one JSON file under the user's config directory holding
// the server base URL, username and password. The file is either fully
// present and well-formed or absent; it is always rewritten wholesale.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Server credentials as persisted on disk. The JSON keys are PascalCase to
/// stay compatible with auth files written by earlier releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Auth {
    pub server_base_url: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The credential file does not exist. Every command except `auth`
    /// treats this as "not authenticated", not as a generic failure.
    #[error("no saved credentials")]
    NotFound,

    #[error("could not resolve the user config directory")]
    NoConfigDir,

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse credentials at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Location of the credential file: `<config_dir>/nsc/auth.json`.
pub fn auth_file_path() -> Result<PathBuf, StoreError> {
    let config_dir = dirs::config_dir().ok_or(StoreError::NoConfigDir)?;
    Ok(config_dir.join("nsc").join("auth.json"))
}

pub fn load() -> Result<Auth, StoreError> {
    load_from(&auth_file_path()?)
}

pub fn save(auth: &Auth) -> Result<(), StoreError> {
    save_to(&auth_file_path()?, auth)
}

pub fn load_from(path: &Path) -> Result<Auth, StoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(StoreError::NotFound),
        Err(err) => return Err(StoreError::io("reading credentials", path, err)),
    };

    let auth = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded credentials");
    Ok(auth)
}

pub fn save_to(path: &Path, auth: &Auth) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|err| StoreError::io("creating config directory", parent, err))?;
    }

    let json = serde_json::to_vec(auth).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        // The file holds a plaintext password; keep it owner-only.
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|err| StoreError::io("opening credentials for writing", path, err))?;
    file.write_all(&json)
        .map_err(|err| StoreError::io("writing credentials", path, err))?;
    debug!(path = %path.display(), "saved credentials");
    Ok(())
}
