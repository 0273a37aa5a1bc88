use std::sync::Arc;

use crate::repository::{BlobStore, StorageError, USERNAME_KEY};

/// Remembers the last display name used to start a session.
#[derive(Clone)]
pub struct PreferenceStore {
    blobs: Arc<dyn BlobStore>,
}

impl PreferenceStore {
    #[must_use]
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Load the remembered display name; blank values read as `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn load_display_name(&self) -> Result<Option<String>, StorageError> {
        let value = self.blobs.get(USERNAME_KEY).await?;
        Ok(value
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty()))
    }

    /// Overwrite the remembered display name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn save_display_name(&self, name: &str) -> Result<(), StorageError> {
        self.blobs.set(USERNAME_KEY, name).await
    }
}
