//! Credential pair storage.
//!
//! The API issues an opaque access/refresh token pair on login. Both tokens
//! are always written and cleared together; the session manager is the only
//! writer, while the HTTP client reads the access token and may clear the
//! pair when the server rejects it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_TOKENS;

/// An access/refresh token pair issued by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token attached to authenticated requests.
    pub access: String,
    /// Refresh token; stored alongside the access token but currently
    /// unused (the client clears both on rejection instead of refreshing).
    pub refresh: String,
}

impl TokenPair {
    /// Creates a new token pair.
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}

/// Durable storage for the credential pair.
///
/// Implementations must treat the pair atomically: `store` replaces both
/// tokens, `clear` removes both. Storage failures are logged, not
/// propagated, so `logout` can never fail.
pub trait TokenStore: Send + Sync {
    /// Returns the persisted access token, if any.
    fn access(&self) -> Option<String>;

    /// Returns the persisted refresh token, if any.
    fn refresh(&self) -> Option<String>;

    /// Persists both tokens, replacing any previous pair.
    fn store(&self, pair: &TokenPair);

    /// Removes both tokens.
    fn clear(&self);
}

/// Process-local token store backed by a mutex.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Option<TokenPair> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl TokenStore for MemoryTokenStore {
    fn access(&self) -> Option<String> {
        self.read().map(|pair| pair.access)
    }

    fn refresh(&self) -> Option<String> {
        self.read().map(|pair| pair.refresh)
    }

    fn store(&self, pair: &TokenPair) {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(pair.clone());
    }

    fn clear(&self) {
        *self
            .inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

/// Serialized layout of the token file: exactly the two fixed keys the
/// original web client kept in browser storage.
#[derive(Debug, Serialize, Deserialize)]
struct StoredTokens {
    access_token: String,
    refresh_token: String,
}

/// Token store persisted as a small JSON file.
///
/// The file holds the two fixed keys `access_token` and `refresh_token`.
/// Every read goes back to disk, so separate processes pointed at the same
/// file observe each other's logins the way browser tabs share storage.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store persisting to the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<StoredTokens> {
        let bytes = std::fs::read(&self.path).ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

impl fmt::Debug for FileTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileTokenStore")
            .field("path", &self.path)
            .finish()
    }
}

impl TokenStore for FileTokenStore {
    fn access(&self) -> Option<String> {
        self.read().map(|tokens| tokens.access_token)
    }

    fn refresh(&self) -> Option<String> {
        self.read().map(|tokens| tokens.refresh_token)
    }

    fn store(&self, pair: &TokenPair) {
        let stored = StoredTokens {
            access_token: pair.access.clone(),
            refresh_token: pair.refresh.clone(),
        };

        let result = serde_json::to_vec_pretty(&stored)
            .map_err(std::io::Error::other)
            .and_then(|bytes| std::fs::write(&self.path, bytes));

        if let Err(error) = result {
            tracing::warn!(
                target: TRACING_TARGET_TOKENS,
                path = %self.path.display(),
                error = %error,
                "failed to persist token pair"
            );
        }
    }

    fn clear(&self) {
        if let Err(error) = std::fs::remove_file(&self.path)
            && error.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(
                target: TRACING_TARGET_TOKENS,
                path = %self.path.display(),
                error = %error,
                "failed to clear token pair"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        assert!(store.access().is_none());

        store.store(&TokenPair::new("acc", "ref"));
        assert_eq!(store.access().as_deref(), Some("acc"));
        assert_eq!(store.refresh().as_deref(), Some("ref"));

        store.clear();
        assert!(store.access().is_none());
        assert!(store.refresh().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));
        assert!(store.access().is_none());

        store.store(&TokenPair::new("acc", "ref"));
        assert_eq!(store.access().as_deref(), Some("acc"));
        assert_eq!(store.refresh().as_deref(), Some("ref"));

        store.clear();
        assert!(store.access().is_none());
        assert!(store.refresh().is_none());
    }

    #[test]
    fn test_file_store_uses_fixed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let store = FileTokenStore::new(&path);

        store.store(&TokenPair::new("acc", "ref"));
        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();

        assert_eq!(raw["access_token"], "acc");
        assert_eq!(raw["refresh_token"], "ref");
    }

    #[test]
    fn test_file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));
        store.clear();
        store.clear();
        assert!(store.access().is_none());
    }
}
