use crate::db::users::User;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const SESSION_FILE: &str = "session.json";
#[cfg(unix)]
const SESSION_FILE_MODE: u32 = 0o600;

/// Token obtained from the backend, with the account and server it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub base_url: String,
    pub token: String,
    pub user: User,
}

/// Persists the current [`Session`] as `session.json` in the data directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: DataStorage,
}

impl SessionStore {
    pub fn new() -> Self {
        Self { storage: DataStorage::new() }
    }

    pub fn at(storage: DataStorage) -> Self {
        Self { storage }
    }

    pub fn path(&self) -> Result<PathBuf> {
        self.storage.get_path(SESSION_FILE)
    }

    /// The cached session, or `None` when nobody is logged in. An unreadable
    /// file counts as logged out.
    pub fn read(&self) -> Result<Option<Session>> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(None);
        }
        match serde_json::from_str(&fs::read_to_string(&path)?) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring corrupt session file");
                Ok(None)
            }
        }
    }

    /// Writes the session readable by the owner only, since it holds a
    /// live bearer token.
    pub fn write(&self, session: &Session) -> Result<()> {
        let path = self.path()?;
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(SESSION_FILE_MODE);
        }
        let mut file = options.open(&path)?;
        // mode only applies on creation
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(SESSION_FILE_MODE))?;
        }
        file.write_all(serde_json::to_string_pretty(session)?.as_bytes())?;
        Ok(())
    }

    /// Removes the cached session. Returns `false` when there was none.
    pub fn delete(&self) -> Result<bool> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)?;
        Ok(true)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
