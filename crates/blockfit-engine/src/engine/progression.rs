use serde::{Deserialize, Serialize};

/// Score needed per level: level `n` ends once the score reaches `n * 500`.
pub const LEVEL_SCORE_STEP: usize = 500;

/// Returns the level reached with `score` points, starting from level 1.
///
/// # Example
///
/// ```
/// use blockfit_engine::level_for_score;
///
/// assert_eq!(level_for_score(0), 1);
/// assert_eq!(level_for_score(499), 1);
/// assert_eq!(level_for_score(500), 2);
/// assert_eq!(level_for_score(1000), 3);
/// ```
#[must_use]
pub const fn level_for_score(score: usize) -> usize {
    score / LEVEL_SCORE_STEP + 1
}

/// Score, level and best score of a game.
///
/// The score only grows, the level never decreases, and
/// `score >= (level - 1) * LEVEL_SCORE_STEP` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    score: usize,
    level: usize,
    high_score: usize,
}

/// What changed in a [`Progression::update_score`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressionChange {
    /// Score after the update.
    pub score: usize,
    /// New level, if at least one threshold was crossed.
    pub level: Option<usize>,
    /// New best score, if the previous one was exceeded.
    pub new_high_score: Option<usize>,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Progression {
    /// Starts a fresh game at score 0 and level 1, remembering a best score
    /// loaded from elsewhere.
    #[must_use]
    pub const fn new(high_score: usize) -> Self {
        Self {
            score: 0,
            level: 1,
            high_score,
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub const fn high_score(&self) -> usize {
        self.high_score
    }

    /// Adds `delta` points and advances the level past every threshold the
    /// new score reaches.
    pub fn update_score(&mut self, delta: usize) -> ProgressionChange {
        self.score = self.score.saturating_add(delta);

        let start_level = self.level;
        while self.score >= self.level * LEVEL_SCORE_STEP {
            self.level += 1;
        }
        let level = (self.level != start_level).then_some(self.level);

        let new_high_score = (self.score > self.high_score).then(|| {
            self.high_score = self.score;
            self.score
        });

        ProgressionChange {
            score: self.score,
            level,
            new_high_score,
        }
    }

    /// Back to score 0 and level 1; the best score is kept.
    pub const fn reset(&mut self) {
        self.score = 0;
        self.level = 1;
    }
}
