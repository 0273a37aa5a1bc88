use std::sync::Arc;

use quiz_core::model::HistoryEntry;
use tracing::{debug, warn};

use crate::repository::{BlobStore, HISTORY_KEY, StorageError};

/// Append-only log of completed-session summaries kept in one JSON blob.
#[derive(Clone)]
pub struct HistoryStore {
    blobs: Arc<dyn BlobStore>,
}

impl HistoryStore {
    #[must_use]
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// All entries in insertion order, oldest first.
    ///
    /// A missing or unparsable blob reads as an empty history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the backend itself cannot be read.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>, StorageError> {
        let raw = self.blobs.get(HISTORY_KEY).await?;
        Ok(decode_history(raw.as_deref()))
    }

    /// Append one entry by rewriting the blob in a single `set`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read or written; the
    /// stored history is unchanged in that case.
    pub async fn append(&self, entry: &HistoryEntry) -> Result<(), StorageError> {
        let mut entries = self.list().await?;
        entries.push(entry.clone());
        let encoded = serde_json::to_string(&entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.blobs.set(HISTORY_KEY, &encoded).await?;
        debug!(id = %entry.id(), total = entries.len(), "history entry appended");
        Ok(())
    }
}

/// Decode the history blob, degrading to empty on a missing key or bad data.
#[must_use]
pub fn decode_history(raw: Option<&str>) -> Vec<HistoryEntry> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<HistoryEntry>>(raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(error = %err, "stored history is malformed; treating it as empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryBlobStore;
    use chrono::Duration;
    use quiz_core::model::{Difficulty, HistoryEntryId};
    use quiz_core::time::fixed_now;

    fn entry(n: u32) -> HistoryEntry {
        HistoryEntry::new(
            HistoryEntryId::new(format!("quiz_{n}")),
            fixed_now() + Duration::minutes(i64::from(n)),
            Difficulty::Medium,
            10,
            n % 11,
            u64::from(n) * 1_000,
            "Ana",
        )
    }

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let store = HistoryStore::new(Arc::new(InMemoryBlobStore::new()));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn appends_round_trip_in_insertion_order() {
        let store = HistoryStore::new(Arc::new(InMemoryBlobStore::new()));
        let appended: Vec<_> = (1..=4).map(entry).collect();
        for e in &appended {
            store.append(e).await.unwrap();
        }
        assert_eq!(store.list().await.unwrap(), appended);
    }

    #[tokio::test]
    async fn malformed_blob_degrades_to_empty_and_is_replaced_on_append() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        blobs.set(HISTORY_KEY, "{oops").await.unwrap();
        let store = HistoryStore::new(blobs.clone());

        assert!(store.list().await.unwrap().is_empty());

        store.append(&entry(1)).await.unwrap();
        assert_eq!(store.list().await.unwrap(), vec![entry(1)]);
    }

    #[test]
    fn decode_handles_missing_and_wrong_shape() {
        assert!(decode_history(None).is_empty());
        assert!(decode_history(Some("{\"not\":\"an array\"}")).is_empty());
        assert!(decode_history(Some("[]")).is_empty());
    }
}
