use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Key holding the last-used display name.
pub const USERNAME_KEY: &str = "quiz.username";

/// Key holding the JSON array of completed-session summaries.
pub const HISTORY_KEY: &str = "quiz.history";

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Key-value blob storage capability.
///
/// `set` replaces the whole value for a key in one step, so a reader never
/// observes a partially written blob.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A missing key is `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Simple in-memory blob store for tests and ephemeral runs.
#[derive(Clone, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryBlobStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlobStore for InMemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .blobs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Blob backend behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub blobs: Arc<dyn BlobStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let blobs: Arc<dyn BlobStore> = Arc::new(InMemoryBlobStore::new());
        Self { blobs }
    }
}
