use rand::Rng;

use crate::model::{Difficulty, Question, QuestionBank};

/// Number of questions drawn for one session.
pub const QUESTIONS_PER_SESSION: usize = 10;

/// Upper bound on the eligible pool; bounds the shuffle cost.
pub const ELIGIBLE_POOL_CAP: usize = 100;

/// Questions drawn for a session plus the size of the pool they came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPlan {
    pub questions: Vec<Question>,
    pub pool_size: usize,
}

impl SelectionPlan {
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Samples questions of one difficulty without replacement.
pub struct QuestionSelector<'a> {
    bank: &'a QuestionBank,
    sample_size: usize,
}

impl<'a> QuestionSelector<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self {
            bank,
            sample_size: QUESTIONS_PER_SESSION,
        }
    }

    #[must_use]
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Bank questions matching `difficulty`, in bank order, capped at [`ELIGIBLE_POOL_CAP`].
    #[must_use]
    pub fn eligible_pool(&self, difficulty: Difficulty) -> Vec<Question> {
        self.bank
            .with_difficulty(difficulty)
            .take(ELIGIBLE_POOL_CAP)
            .cloned()
            .collect()
    }

    /// Shuffle the eligible pool and keep the first `min(sample_size, pool)` questions.
    ///
    /// The shuffled order is the presentation order. An empty pool yields an empty plan.
    pub fn select<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> SelectionPlan {
        let mut pool = self.eligible_pool(difficulty);
        let pool_size = pool.len();
        fisher_yates(&mut pool, rng);
        pool.truncate(self.sample_size.min(pool_size));
        SelectionPlan {
            questions: pool,
            pool_size,
        }
    }
}

/// In-place uniform permutation: for `i` from the last index down to 1, swap `i`
/// with a uniformly chosen `j <= i`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}
