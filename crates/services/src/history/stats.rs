use chrono::{DateTime, Utc};
use serde::Serialize;

use quiz_core::model::{Difficulty, HistoryEntry};

/// How many top scores the dashboard lists.
pub const BEST_SCORES_LIMIT: usize = 3;

/// How many recent games the progress trend covers.
pub const TREND_LIMIT: usize = 5;

/// Number of completed games per difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DifficultyCounts {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyCounts {
    #[must_use]
    pub fn get(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

/// One point of the recent-progress chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: DateTime<Utc>,
    /// Score rounded to a whole percent.
    pub score_percent: u32,
}

/// Derived dashboard figures. Computing them never touches the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryStats {
    pub total_games: usize,
    pub average_score_percent: f64,
    pub average_time_ms: f64,
    /// Highest correct/total ratios first; ties keep insertion order.
    pub best_scores: Vec<HistoryEntry>,
    pub by_difficulty: DifficultyCounts,
    /// The most recent games, oldest first.
    pub trend: Vec<TrendPoint>,
}

impl HistoryStats {
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let total_games = entries.len();
        let games = total_games as f64;
        let average_score_percent =
            entries.iter().map(HistoryEntry::score_percent).sum::<f64>() / games;
        let average_time_ms = entries
            .iter()
            .map(|e| e.time_spent_ms() as f64)
            .sum::<f64>()
            / games;

        let mut by_difficulty = DifficultyCounts::default();
        for entry in entries {
            match entry.difficulty() {
                Difficulty::Easy => by_difficulty.easy += 1,
                Difficulty::Medium => by_difficulty.medium += 1,
                Difficulty::Hard => by_difficulty.hard += 1,
            }
        }

        let mut best_scores = entries.to_vec();
        best_scores.sort_by(|a, b| b.score_percent().total_cmp(&a.score_percent()));
        best_scores.truncate(BEST_SCORES_LIMIT);

        let mut newest = entries.to_vec();
        newest.sort_by(|a, b| b.date().cmp(&a.date()));
        let trend = newest
            .iter()
            .take(TREND_LIMIT)
            .rev()
            .map(|e| TrendPoint {
                date: e.date(),
                score_percent: e.score_percent().round() as u32,
            })
            .collect();

        Self {
            total_games,
            average_score_percent,
            average_time_ms,
            best_scores,
            by_difficulty,
            trend,
        }
    }
}
