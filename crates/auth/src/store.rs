//! Persisted credential storage.
//!
//! One opaque token under a fixed key, surviving restarts until logout.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use anyhow::Context;
use thiserror::Error;

use crate::token::BearerToken;

/// Fixed storage key of the admin token.
pub const TOKEN_STORAGE_KEY: &str = "adminToken";

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("token storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Credential storage abstraction.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<BearerToken>, TokenStoreError>;
    fn save(&self, token: &BearerToken) -> Result<(), TokenStoreError>;
    /// Remove the token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// File-backed store: `{dir}/adminToken`.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_STORAGE_KEY),
        }
    }

    /// Store under the OS data directory: `{data_dir}/eventsite/adminToken`.
    pub fn default_location() -> anyhow::Result<Self> {
        let base = dirs::data_dir()
            .or_else(|| {
                dirs::home_dir().map(|mut h| {
                    h.push(".local");
                    h.push("share");
                    h
                })
            })
            .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

        Ok(Self::new(base.join("eventsite")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<BearerToken>, TokenStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let value = content.trim();
                Ok((!value.is_empty()).then(|| BearerToken::new(value)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, token: &BearerToken) -> Result<(), TokenStoreError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, token.as_str())?;

        // Owner-only on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<BearerToken>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: BearerToken) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<BearerToken>, TokenStoreError> {
        Ok(self.token.read().map(|t| t.clone()).unwrap_or_default())
    }

    fn save(&self, token: &BearerToken) -> Result<(), TokenStoreError> {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        Ok(())
    }
}
