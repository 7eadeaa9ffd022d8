//! Persistence of the one access token `login` obtains and `postMessage`
//! needs.
//!
//! Handlers only see the [CredentialStore] trait; the binary wires in a
//! [FileStore] and tests use [MemoryStore].

use crate::slack::auth::SlackAccessToken;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

/// Name of the credential file inside the config directory.
pub const FILE_NAME: &str = "config.json";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("could not access credentials at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("credentials at {} are corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read/write access to the single stored token.
pub trait CredentialStore {
    /// The stored token, or `None` when nobody has logged in yet.
    fn get(&self) -> Result<Option<SlackAccessToken>, CredentialError>;

    /// Replace whatever is stored with `token`.
    fn set(&self, token: &SlackAccessToken) -> Result<(), CredentialError>;
}

/// On-disk shape of the credential file.
#[derive(Serialize, Deserialize)]
struct Record {
    token: SlackAccessToken,
}

/// Stores the token as `{"token": "..."}` in [FILE_NAME] under a config
/// directory.
///
/// On unix the directory is created `0700` and the file is `0600`. Writes go
/// through a temp file renamed into place, so a reader never sees half a file.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> CredentialError {
        CredentialError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Result<Option<SlackAccessToken>, CredentialError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no credential file");
                return Ok(None);
            }
            Err(e) => return Err(self.io_err(e)),
        };

        let record: Record =
            serde_json::from_str(&raw).map_err(|source| CredentialError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        Ok(Some(record.token).filter(|t| !t.0.is_empty()))
    }

    fn set(&self, token: &SlackAccessToken) -> Result<(), CredentialError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        create_private_dir(dir).map_err(|e| self.io_err(e))?;

        let record = Record {
            token: token.clone(),
        };
        let raw =
            serde_json::to_string_pretty(&record).map_err(|source| CredentialError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_err(e))?;
        restrict_to_owner(tmp.as_file()).map_err(|e| self.io_err(e))?;
        tmp.write_all(raw.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| self.io_err(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_err(e.error))?;

        info!(path = %self.path.display(), "stored credentials");

        Ok(())
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn restrict_to_owner(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_to_owner(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

/// Keeps the token in memory for the lifetime of the value.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    token: std::cell::RefCell<Option<SlackAccessToken>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn with_token(t: &str) -> Self {
        Self {
            token: std::cell::RefCell::new(Some(SlackAccessToken(t.into()))),
        }
    }
}

#[cfg(test)]
impl CredentialStore for MemoryStore {
    fn get(&self) -> Result<Option<SlackAccessToken>, CredentialError> {
        Ok(self.token.borrow().clone())
    }

    fn set(&self, token: &SlackAccessToken) -> Result<(), CredentialError> {
        *self.token.borrow_mut() = Some(token.clone());
        Ok(())
    }
}
