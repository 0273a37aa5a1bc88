use crate::model::QuestionId;

/// Record of the option picked for one question of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: QuestionId,
    pub selected_option: usize,
    pub is_correct: bool,
    /// Milliseconds since the session started.
    pub elapsed_ms: u64,
}

impl Answer {
    #[must_use]
    pub fn new(
        question_id: QuestionId,
        selected_option: usize,
        is_correct: bool,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            question_id,
            selected_option,
            is_correct,
            elapsed_ms,
        }
    }
}
