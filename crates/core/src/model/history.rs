use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, HistoryEntryId};

//
// ─── HISTORY ENTRY ─────────────────────────────────────────────────────────────
//

/// Immutable summary of one completed quiz session.
///
/// The serialized shape is the persisted wire format of the history blob:
/// `{id, date, difficulty, totalQuestions, correctAnswers, timeSpentMs, username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: HistoryEntryId,
    #[serde(with = "iso_millis")]
    date: DateTime<Utc>,
    difficulty: Difficulty,
    total_questions: u32,
    correct_answers: u32,
    time_spent_ms: u64,
    username: String,
}

impl HistoryEntry {
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        id: HistoryEntryId,
        date: DateTime<Utc>,
        difficulty: Difficulty,
        total_questions: u32,
        correct_answers: u32,
        time_spent_ms: u64,
        username: impl Into<String>,
    ) -> Self {
        Self {
            id,
            date,
            difficulty,
            total_questions,
            correct_answers,
            time_spent_ms,
            username: username.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &HistoryEntryId {
        &self.id
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    #[must_use]
    pub fn time_spent_ms(&self) -> u64 {
        self.time_spent_ms
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Share of correct answers in percent, `0.0` for an entry without questions.
    #[must_use]
    pub fn score_percent(&self) -> f64 {
        score_percent(self.correct_answers, self.total_questions)
    }
}

#[must_use]
pub fn score_percent(correct: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    f64::from(correct) / f64::from(total) * 100.0
}

//
// ─── SCORE TIER ────────────────────────────────────────────────────────────────
//

/// Achievement label awarded on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    /// 90% and above.
    Master,
    /// 70% and above.
    Advanced,
    /// 50% and above.
    Knowledgeable,
    Apprentice,
}

impl ScoreTier {
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 90.0 {
            Self::Master
        } else if percent >= 70.0 {
            Self::Advanced
        } else if percent >= 50.0 {
            Self::Knowledgeable
        } else {
            Self::Apprentice
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::Master => "Master",
            ScoreTier::Advanced => "Advanced Student",
            ScoreTier::Knowledgeable => "Knowledgeable",
            ScoreTier::Apprentice => "Apprentice",
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix, the format browsers emit.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
