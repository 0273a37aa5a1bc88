#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod history;
pub mod quiz;
pub mod time_fmt;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, HistoryServiceError, QuizServiceError};
pub use history::{HistoryService, HistoryStats};
pub use quiz::{AdvanceOutcome, QuizProgress, QuizService};
