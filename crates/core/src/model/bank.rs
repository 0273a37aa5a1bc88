use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Difficulty, Question, QuestionDraft, QuestionError, QuestionId};

const BUNDLED_QUESTIONS: &str = include_str!("../../data/questions.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("duplicate question id: {0}")]
    DuplicateId(QuestionId),

    #[error(transparent)]
    Question(#[from] QuestionError),

    #[error("invalid question bank data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Static, ordered collection of questions keyed by id.
///
/// The bank keeps the order it was built in; selection relies on that order
/// when it takes the eligible-pool prefix.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
    by_id: HashMap<QuestionId, usize>,
}

impl QuestionBank {
    /// Build a bank from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `BankError::DuplicateId` if two questions share an id.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, BankError> {
        let mut by_id = HashMap::with_capacity(questions.len());
        for (idx, question) in questions.iter().enumerate() {
            if by_id.insert(question.id().clone(), idx).is_some() {
                return Err(BankError::DuplicateId(question.id().clone()));
            }
        }
        Ok(Self { questions, by_id })
    }

    /// Parse and validate a JSON array of question drafts.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the JSON is malformed, a question is invalid, or ids repeat.
    pub fn from_json(json: &str) -> Result<Self, BankError> {
        let drafts: Vec<QuestionDraft> = serde_json::from_str(json)?;
        let questions = drafts
            .into_iter()
            .map(QuestionDraft::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_questions(questions)
    }

    /// The question bank shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the bundled data fails validation.
    pub fn bundled() -> Result<Self, BankError> {
        Self::from_json(BUNDLED_QUESTIONS)
    }

    #[must_use]
    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.by_id.get(id).map(|&idx| &self.questions[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    /// Questions of one difficulty, in bank order.
    pub fn with_difficulty(&self, difficulty: Difficulty) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.difficulty() == difficulty)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, difficulty: Difficulty) -> Question {
        QuestionDraft {
            id: id.into(),
            prompt: format!("prompt {id}"),
            options: vec!["a".into(), "b".into()],
            correct_option: 0,
            difficulty,
            citation: None,
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn bundled_bank_has_ten_per_difficulty() {
        let bank = QuestionBank::bundled().unwrap();
        assert_eq!(bank.len(), 30);
        for difficulty in Difficulty::ALL {
            assert_eq!(bank.with_difficulty(difficulty).count(), 10);
        }
        let first = bank.get(&QuestionId::new("e1")).unwrap();
        assert_eq!(first.difficulty(), Difficulty::Easy);
        assert_eq!(first.citation(), Some("Genesis 6:14"));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = QuestionBank::from_questions(vec![
            question("q1", Difficulty::Easy),
            question("q1", Difficulty::Hard),
        ])
        .unwrap_err();
        assert!(matches!(err, BankError::DuplicateId(id) if id.as_str() == "q1"));
    }

    #[test]
    fn filters_preserve_bank_order() {
        let bank = QuestionBank::from_questions(vec![
            question("a", Difficulty::Easy),
            question("b", Difficulty::Hard),
            question("c", Difficulty::Easy),
        ])
        .unwrap();
        let ids: Vec<_> = bank
            .with_difficulty(Difficulty::Easy)
            .map(|q| q.id().as_str())
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            QuestionBank::from_json("{not json").unwrap_err(),
            BankError::Parse(_)
        ));
    }
}
