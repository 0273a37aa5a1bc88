use chrono::{DateTime, Utc};
use rand::Rng;
use std::fmt;
use thiserror::Error;

use crate::model::{
    Answer, Difficulty, HistoryEntry, HistoryEntryId, Question, QuestionBank, ScoreTier,
    score_percent,
};
use crate::selection::QuestionSelector;
use crate::time::elapsed_ms;

//
// ─── STATUS & TRANSITIONS ──────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No questions selected.
    Idle,
    /// Question loop in progress.
    Active,
    /// Terminal until reset.
    Completed,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SessionStatus::Idle => "idle",
            SessionStatus::Active => "active",
            SessionStatus::Completed => "completed",
        })
    }
}

/// Transitions that require an active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Answer,
    Advance,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Transition::Answer => "answer",
            Transition::Advance => "advance",
        })
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Precondition violations. A rejected transition leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("display name cannot be empty")]
    EmptyDisplayName,

    #[error("cannot {action} while session is {status}")]
    InvalidTransition {
        action: Transition,
        status: SessionStatus,
    },

    #[error("session has no current question")]
    NoCurrentQuestion,

    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("question {index} was already answered")]
    AlreadyAnswered { index: usize },

    #[error("question {index} must be answered before advancing")]
    Unanswered { index: usize },
}

//
// ─── COMPLETION ────────────────────────────────────────────────────────────────
//

/// Emitted once when a session moves from `active` to `completed`.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCompletion {
    pub difficulty: Difficulty,
    pub display_name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub total_questions: u32,
    pub answered: u32,
    pub correct_answers: u32,
}

impl SessionCompletion {
    #[must_use]
    pub fn time_spent_ms(&self) -> u64 {
        elapsed_ms(self.started_at, self.ended_at)
    }

    #[must_use]
    pub fn score_percent(&self) -> f64 {
        score_percent(self.correct_answers, self.total_questions)
    }

    #[must_use]
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_percent(self.score_percent())
    }

    /// Sessions finished without a single answer are not recorded.
    #[must_use]
    pub fn is_recordable(&self) -> bool {
        self.answered > 0
    }

    /// Snapshot for the history store, or `None` when nothing was answered.
    #[must_use]
    pub fn to_history_entry(&self, id: HistoryEntryId) -> Option<HistoryEntry> {
        if !self.is_recordable() {
            return None;
        }
        Some(HistoryEntry::new(
            id,
            self.ended_at,
            self.difficulty,
            self.total_questions,
            self.correct_answers,
            self.time_spent_ms(),
            self.display_name.clone(),
        ))
    }
}

/// Outcome of a successful `advance`.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the question at this index.
    Next { index: usize },
    Completed(SessionCompletion),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One play-through: difficulty choice, question loop, completion.
///
/// Invariants while active: `answers.len() <= current_index + 1 <= questions.len()`
/// and questions are answered once each, in order. `Completed` implies `ended_at`
/// is set and every question was answered.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    difficulty: Option<Difficulty>,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<Answer>,
    started_at: Option<DateTime<Utc>>,
    question_started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    status: SessionStatus,
    display_name: String,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl QuizSession {
    /// Idle session carrying a remembered display name (may be empty).
    #[must_use]
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            difficulty: None,
            questions: Vec::new(),
            current_index: 0,
            answers: Vec::new(),
            started_at: None,
            question_started_at: None,
            ended_at: None,
            status: SessionStatus::Idle,
            display_name: display_name.into(),
        }
    }

    /// Draw questions for `difficulty` and start the question loop. Valid from any state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyDisplayName` if `display_name` is blank after trimming.
    pub fn select_difficulty<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        display_name: &str,
        bank: &QuestionBank,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let name = display_name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyDisplayName);
        }

        let plan = QuestionSelector::new(bank).select(difficulty, rng);

        self.difficulty = Some(difficulty);
        self.questions = plan.questions;
        self.current_index = 0;
        self.answers.clear();
        self.started_at = Some(now);
        self.question_started_at = Some(now);
        self.ended_at = None;
        self.status = SessionStatus::Active;
        name.clone_into(&mut self.display_name);
        Ok(())
    }

    /// Record the option picked for the current question. Does not move the pointer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` if the session is not active, has no current question,
    /// the question was already answered, or `option_index` is out of range.
    pub fn answer_current_question(
        &mut self,
        option_index: usize,
        now: DateTime<Utc>,
    ) -> Result<&Answer, SessionError> {
        self.require_active(Transition::Answer)?;
        let question = self
            .questions
            .get(self.current_index)
            .ok_or(SessionError::NoCurrentQuestion)?;
        if self.answers.len() > self.current_index {
            return Err(SessionError::AlreadyAnswered {
                index: self.current_index,
            });
        }
        let len = question.options().len();
        if option_index >= len {
            return Err(SessionError::OptionOutOfRange {
                index: option_index,
                len,
            });
        }

        let elapsed = self.started_at.map_or(0, |start| elapsed_ms(start, now));
        self.answers.push(Answer::new(
            question.id().clone(),
            option_index,
            question.is_correct(option_index),
            elapsed,
        ));
        Ok(&self.answers[self.answers.len() - 1])
    }

    /// Move to the next question, or complete the session after the last one.
    ///
    /// An empty question list completes immediately.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidTransition` outside `active` and
    /// `SessionError::Unanswered` if the current question has no answer yet.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<Advance, SessionError> {
        self.require_active(Transition::Advance)?;
        if !self.questions.is_empty() && self.answers.len() <= self.current_index {
            return Err(SessionError::Unanswered {
                index: self.current_index,
            });
        }

        if self.current_index + 1 < self.questions.len() {
            self.current_index += 1;
            self.question_started_at = Some(now);
            return Ok(Advance::Next {
                index: self.current_index,
            });
        }

        self.status = SessionStatus::Completed;
        self.ended_at = Some(now);
        Ok(Advance::Completed(self.completion(now)))
    }

    /// Back to idle, keeping only the display name.
    pub fn reset(&mut self) {
        let display_name = std::mem::take(&mut self.display_name);
        *self = Self::new(display_name);
    }

    fn require_active(&self, action: Transition) -> Result<(), SessionError> {
        if self.status == SessionStatus::Active {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                status: self.status,
            })
        }
    }

    fn completion(&self, ended_at: DateTime<Utc>) -> SessionCompletion {
        let to_u32 = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
        SessionCompletion {
            // Active sessions always carry a difficulty.
            difficulty: self.difficulty.unwrap_or(Difficulty::Easy),
            display_name: self.display_name.clone(),
            started_at: self.started_at.unwrap_or(ended_at),
            ended_at,
            total_questions: to_u32(self.questions.len()),
            answered: to_u32(self.answers.len()),
            correct_answers: to_u32(self.correct_count()),
        }
    }

    // ─── Read-only view ────────────────────────────────────────────────────────

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.status == SessionStatus::Active {
            self.questions.get(self.current_index)
        } else {
            None
        }
    }

    /// Answer recorded for the current question, if it was answered.
    #[must_use]
    pub fn current_answer(&self) -> Option<&Answer> {
        self.answers.get(self.current_index)
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Advisory per-question timer: time since the current question was shown,
    /// frozen at completion.
    #[must_use]
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        match (self.question_started_at, self.ended_at) {
            (Some(start), Some(end)) => elapsed_ms(start, end),
            (Some(start), None) => elapsed_ms(start, now),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
