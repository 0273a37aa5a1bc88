use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::Storage;

use crate::Clock;
use crate::error::{AppServicesError, QuizServiceError};
use crate::history::HistoryService;
use crate::quiz::QuizService;

/// Assembles app-facing services over one blob backend and the bundled bank.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    storage: Storage,
    bank: Arc<QuestionBank>,
    history: Arc<HistoryService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the bundled
    /// bank does not validate.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock)
    }

    /// Build services over a throwaway in-memory store.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the bundled bank does not validate.
    pub fn in_memory(clock: Clock) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock)
    }

    fn from_storage(storage: Storage, clock: Clock) -> Result<Self, AppServicesError> {
        let bank = Arc::new(QuestionBank::bundled()?);
        let history = Arc::new(HistoryService::new(Arc::clone(&storage.blobs)));
        Ok(Self {
            clock,
            storage,
            bank,
            history,
        })
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn history(&self) -> Arc<HistoryService> {
        Arc::clone(&self.history)
    }

    /// A quiz driver seeded with the remembered display name.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the preference cannot be read.
    pub async fn quiz(&self) -> Result<QuizService, QuizServiceError> {
        QuizService::load(
            self.clock,
            Arc::clone(&self.bank),
            Arc::clone(&self.storage.blobs),
        )
        .await
    }
}
