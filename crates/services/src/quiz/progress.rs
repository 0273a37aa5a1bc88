use quiz_core::session::{QuizSession, SessionStatus};

/// Aggregated view of quiz progress, useful for a rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizProgress {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub remaining: usize,
    /// 1-based position of the current question, `0` when there is none.
    pub position: usize,
    pub is_complete: bool,
}

impl QuizProgress {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let total = session.questions().len();
        let answered = session.answers().len();
        let position = if session.status() == SessionStatus::Active && total > 0 {
            session.current_index() + 1
        } else {
            0
        };
        Self {
            total,
            answered,
            correct: session.correct_count(),
            remaining: total.saturating_sub(answered),
            position,
            is_complete: session.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_session_has_no_progress() {
        let progress = QuizProgress::from_session(&QuizSession::new("Ana"));
        assert_eq!(
            progress,
            QuizProgress {
                total: 0,
                answered: 0,
                correct: 0,
                remaining: 0,
                position: 0,
                is_complete: false,
            }
        );
    }
}
