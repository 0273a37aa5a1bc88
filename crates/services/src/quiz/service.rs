use std::sync::Arc;

use chrono::Duration;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use quiz_core::model::{Answer, Difficulty, HistoryEntry, HistoryEntryId, QuestionBank};
use quiz_core::session::{Advance, QuizSession, SessionCompletion};
use storage::repository::BlobStore;
use storage::{HistoryStore, PreferenceStore};

use super::progress::QuizProgress;
use crate::Clock;
use crate::error::QuizServiceError;

/// Result of advancing past the current question.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// Moved to the question at this index.
    Next { index: usize },
    /// The session completed. `recorded` is the appended history entry, absent
    /// when nothing was answered or the append failed.
    Completed {
        completion: SessionCompletion,
        recorded: Option<HistoryEntry>,
    },
}

impl AdvanceOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, AdvanceOutcome::Completed { .. })
    }
}

/// Drives a `QuizSession` and performs its side effects: remembering the
/// display name on start and appending history on completion.
pub struct QuizService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    session: QuizSession,
    history: HistoryStore,
    preferences: PreferenceStore,
    rng: StdRng,
}

impl QuizService {
    /// Build a service over `blobs`, seeding the idle session with the remembered name.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if the preference cannot be read.
    pub async fn load(
        clock: Clock,
        bank: Arc<QuestionBank>,
        blobs: Arc<dyn BlobStore>,
    ) -> Result<Self, QuizServiceError> {
        let preferences = PreferenceStore::new(Arc::clone(&blobs));
        let display_name = preferences.load_display_name().await?.unwrap_or_default();
        Ok(Self {
            clock,
            bank,
            session: QuizSession::new(display_name),
            history: HistoryStore::new(blobs),
            preferences,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Replace the random source, e.g. with a seeded one in tests.
    #[must_use]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Moves a fixed clock forward; no effect on the system clock.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.clock.advance(delta);
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress::from_session(&self.session)
    }

    /// Advisory timer for the rendering surface.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.session.elapsed_ms(self.clock.now())
    }

    /// Start a session at `difficulty` for `display_name`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if the display name is blank.
    pub async fn select_difficulty(
        &mut self,
        difficulty: Difficulty,
        display_name: &str,
    ) -> Result<&QuizSession, QuizServiceError> {
        let now = self.clock.now();
        self.session
            .select_difficulty(difficulty, display_name, &self.bank, &mut self.rng, now)?;
        debug!(
            %difficulty,
            questions = self.session.questions().len(),
            "session started"
        );

        if let Err(err) = self
            .preferences
            .save_display_name(self.session.display_name())
            .await
        {
            warn!(error = %err, "failed to remember display name");
        }
        Ok(&self.session)
    }

    /// Record the option picked for the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` for invalid transitions, repeated answers,
    /// or out-of-range options.
    pub fn answer_current_question(
        &mut self,
        option_index: usize,
    ) -> Result<Answer, QuizServiceError> {
        let now = self.clock.now();
        let answer = self
            .session
            .answer_current_question(option_index, now)?
            .clone();
        debug!(
            question = %answer.question_id,
            correct = answer.is_correct,
            "answer recorded"
        );
        Ok(answer)
    }

    /// Move to the next question or complete the session.
    ///
    /// On completion with at least one answer the summary is appended to the
    /// history. A failed append is logged and reported as `recorded: None`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if the session is not active or the
    /// current question is unanswered.
    pub async fn advance(&mut self) -> Result<AdvanceOutcome, QuizServiceError> {
        let now = self.clock.now();
        match self.session.advance(now)? {
            Advance::Next { index } => Ok(AdvanceOutcome::Next { index }),
            Advance::Completed(completion) => {
                let recorded = self.record(&completion).await;
                Ok(AdvanceOutcome::Completed {
                    completion,
                    recorded,
                })
            }
        }
    }

    /// Abandon or leave the current session; keeps the display name.
    pub fn reset(&mut self) {
        self.session.reset();
        debug!("session reset");
    }

    async fn record(&self, completion: &SessionCompletion) -> Option<HistoryEntry> {
        let entry = completion.to_history_entry(HistoryEntryId::generate())?;
        match self.history.append(&entry).await {
            Ok(()) => {
                info!(
                    difficulty = %entry.difficulty(),
                    correct = entry.correct_answers(),
                    total = entry.total_questions(),
                    "quiz completed"
                );
                Some(entry)
            }
            Err(err) => {
                warn!(error = %err, "failed to append quiz history");
                None
            }
        }
    }
}
