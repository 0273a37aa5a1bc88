mod progress;
mod service;

pub use crate::error::QuizServiceError;
pub use progress::QuizProgress;
pub use service::{AdvanceOutcome, QuizService};
