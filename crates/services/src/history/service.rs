use std::sync::Arc;

use quiz_core::model::HistoryEntry;
use storage::HistoryStore;
use storage::repository::BlobStore;

use super::stats::HistoryStats;
use crate::error::HistoryServiceError;

/// Read-only reporting facade over the history store.
///
/// Aggregates are recomputed from the stored entries on each call and never
/// write back.
#[derive(Clone)]
pub struct HistoryService {
    history: HistoryStore,
}

impl HistoryService {
    #[must_use]
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            history: HistoryStore::new(blobs),
        }
    }

    /// All entries in insertion order, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the backend cannot be read.
    pub async fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryServiceError> {
        Ok(self.history.list().await?)
    }

    /// Entries sorted newest first, for a recent-games list.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the backend cannot be read.
    pub async fn recent(&self) -> Result<Vec<HistoryEntry>, HistoryServiceError> {
        let mut entries = self.entries().await?;
        entries.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(entries)
    }

    /// Dashboard aggregates.
    ///
    /// # Errors
    ///
    /// Returns `HistoryServiceError::Storage` if the backend cannot be read.
    pub async fn stats(&self) -> Result<HistoryStats, HistoryServiceError> {
        let entries = self.entries().await?;
        Ok(HistoryStats::from_entries(&entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{Difficulty, HistoryEntryId};
    use quiz_core::time::fixed_now;
    use storage::repository::InMemoryBlobStore;

    #[tokio::test]
    async fn recent_sorts_newest_first_without_touching_store() {
        let blobs = Arc::new(InMemoryBlobStore::new());
        let store = HistoryStore::new(blobs.clone());
        for (n, minutes) in [(1, 5), (2, 1), (3, 9)] {
            store
                .append(&HistoryEntry::new(
                    HistoryEntryId::new(format!("quiz_{n}")),
                    fixed_now() + Duration::minutes(minutes),
                    Difficulty::Easy,
                    10,
                    5,
                    1_000,
                    "Ana",
                ))
                .await
                .unwrap();
        }

        let svc = HistoryService::new(blobs);
        let ids: Vec<_> = svc
            .recent()
            .await
            .unwrap()
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(ids, ["quiz_3", "quiz_1", "quiz_2"]);

        let stored: Vec<_> = svc
            .entries()
            .await
            .unwrap()
            .iter()
            .map(|e| e.id().to_string())
            .collect();
        assert_eq!(stored, ["quiz_1", "quiz_2", "quiz_3"]);
    }
}
