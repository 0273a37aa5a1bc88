mod answer;
mod bank;
mod difficulty;
mod history;
mod ids;
mod question;

pub use ids::{HistoryEntryId, QuestionId};

pub use answer::Answer;
pub use bank::{BankError, QuestionBank};
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use history::{HistoryEntry, ScoreTier, score_percent};
pub use question::{Question, QuestionDraft, QuestionError};
