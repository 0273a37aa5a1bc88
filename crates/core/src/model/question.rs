use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Difficulty, QuestionId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question id cannot be empty")]
    EmptyId,

    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: String },

    #[error("question {id} needs at least 2 options, got {len}")]
    TooFewOptions { id: String, len: usize },

    #[error("question {id} marks option {index} as correct but only has {len} options")]
    CorrectOptionOutOfRange { id: String, index: usize, len: usize },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it appears in bundled bank data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: usize,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub citation: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the id or prompt is blank, there are fewer than
    /// two options, or the correct option does not index into the options.
    pub fn validate(self) -> Result<Question, QuestionError> {
        let id = self.id.trim().to_owned();
        if id.is_empty() {
            return Err(QuestionError::EmptyId);
        }
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id });
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id,
                len: self.options.len(),
            });
        }
        if self.correct_option >= self.options.len() {
            return Err(QuestionError::CorrectOptionOutOfRange {
                id,
                index: self.correct_option,
                len: self.options.len(),
            });
        }

        let citation = self
            .citation
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty());

        Ok(Question {
            id: QuestionId::new(id),
            prompt: self.prompt,
            options: self.options,
            correct_option: self.correct_option,
            difficulty: self.difficulty,
            citation,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    prompt: String,
    options: Vec<String>,
    correct_option: usize,
    difficulty: Difficulty,
    citation: Option<String>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Source reference shown next to the revealed answer, if any.
    #[must_use]
    pub fn citation(&self) -> Option<&str> {
        self.citation.as_deref()
    }

    #[must_use]
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_option
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            id: "e1".into(),
            prompt: "Who built the ark?".into(),
            options: vec!["Abraham".into(), "Noah".into()],
            correct_option: 1,
            difficulty: Difficulty::Easy,
            citation: Some("  ".into()),
        }
    }

    #[test]
    fn valid_draft_builds_question() {
        let q = draft().validate().unwrap();
        assert_eq!(q.id().as_str(), "e1");
        assert!(q.is_correct(1));
        assert!(!q.is_correct(0));
        assert_eq!(q.citation(), None);
    }

    #[test]
    fn rejects_single_option() {
        let mut d = draft();
        d.options.truncate(1);
        d.correct_option = 0;
        assert!(matches!(
            d.validate().unwrap_err(),
            QuestionError::TooFewOptions { len: 1, .. }
        ));
    }

    #[test]
    fn rejects_out_of_range_correct_option() {
        let mut d = draft();
        d.correct_option = 2;
        assert!(matches!(
            d.validate().unwrap_err(),
            QuestionError::CorrectOptionOutOfRange { index: 2, len: 2, .. }
        ));
    }

    #[test]
    fn rejects_blank_prompt_and_id() {
        let mut d = draft();
        d.prompt = " ".into();
        assert!(matches!(d.validate().unwrap_err(), QuestionError::EmptyPrompt { .. }));

        let mut d = draft();
        d.id = String::new();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyId);
    }
}
