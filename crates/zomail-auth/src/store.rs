//! Refresh-token persistence
//!
//! The refresh token is the only durable credential: Zoho may rotate it on
//! any exchange, and the rotated value must survive a process restart. The
//! file store writes a single JSON object `{"refresh_token": "..."}` and
//! overwrites it wholesale on every save. Last writer wins; there is no
//! locking.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AuthError, AuthResult};

/// On-disk shape of the persisted refresh token
#[derive(Debug, Serialize, Deserialize)]
struct PersistedToken {
    refresh_token: String,
}

/// Storage backend for the refresh token.
///
/// Implementations are selected from the configured token store kind;
/// [`TokenManager`](crate::TokenManager) falls back to the configured
/// refresh token whenever `load` yields nothing.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Load the persisted refresh token, if any.
    async fn load(&self) -> AuthResult<Option<String>>;

    /// Persist a refresh token, replacing any previous value.
    async fn save(&self, refresh_token: &str) -> AuthResult<()>;
}

/// File-backed token store.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store persisting to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> AuthResult<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AuthError::IoError(e)),
        };

        let persisted: PersistedToken = serde_json::from_str(&contents).map_err(|e| {
            AuthError::StoreError(format!("failed to parse {}: {e}", self.path.display()))
        })?;

        debug!("loaded refresh token from {}", self.path.display());
        Ok(Some(persisted.refresh_token))
    }

    async fn save(&self, refresh_token: &str) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string(&PersistedToken {
            refresh_token: refresh_token.to_string(),
        })
        .map_err(|e| AuthError::StoreError(format!("failed to serialize token: {e}")))?;

        tokio::fs::write(&self.path, json).await?;
        debug!("persisted refresh token to {}", self.path.display());
        Ok(())
    }
}

/// In-memory token store.
///
/// Starts empty; the manager uses the configured refresh token until a
/// rotated one is saved here. Everything is lost on restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> AuthResult<Option<String>> {
        Ok(self.token.lock().unwrap().clone())
    }

    async fn save(&self, refresh_token: &str) -> AuthResult<()> {
        *self.token.lock().unwrap() = Some(refresh_token.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token.json"));

        store.save("1000.rotated").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("1000.rotated".to_string()));
    }

    #[tokio::test]
    async fn file_store_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/deeper/token.json"));

        store.save("1000.nested").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("1000.nested".to_string()));
    }

    #[tokio::test]
    async fn file_store_overwrites_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        let store = FileTokenStore::new(&path);

        store.save("first").await.unwrap();
        store.save("second").await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"refresh_token":"second"}"#);
    }

    #[tokio::test]
    async fn file_store_absent_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("missing.json"));

        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token.json");
        std::fs::write(&path, "not json at all").unwrap();

        let err = FileTokenStore::new(&path).load().await.unwrap_err();
        assert!(matches!(err, AuthError::StoreError(_)));
    }

    #[tokio::test]
    async fn memory_store_starts_empty_and_overwrites() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        store.save("first").await.unwrap();
        store.save("second").await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some("second".to_string()));
    }
}
