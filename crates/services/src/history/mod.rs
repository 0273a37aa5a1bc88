mod service;
mod stats;

pub use crate::error::HistoryServiceError;
pub use service::HistoryService;
pub use stats::{BEST_SCORES_LIMIT, DifficultyCounts, HistoryStats, TREND_LIMIT, TrendPoint};
