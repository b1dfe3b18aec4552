use serde::{Deserialize, Serialize};

/// Number of combo buckets: 0, 1, 2 and 3 lines, then 4 or more.
pub const COMBO_BUCKETS: usize = 5;

/// Per-game counters kept next to the score.
///
/// - **Placed pieces**: every accepted placement
/// - **Cleared lines**: rows and columns, counted separately
/// - **Combo histogram**: placements by number of lines they cleared
///
/// # Example
///
/// ```
/// use blockfit_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_placement(0);
/// stats.complete_placement(3);
///
/// assert_eq!(stats.placed_pieces(), 2);
/// assert_eq!(stats.total_cleared_lines(), 3);
/// assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 1, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    placed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; COMBO_BUCKETS],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            placed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; COMBO_BUCKETS],
        }
    }

    #[must_use]
    pub const fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of placements by lines cleared.
    ///
    /// Index `n` counts placements that cleared exactly `n` lines; the last
    /// bucket collects every combo of four lines or more.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; COMBO_BUCKETS] {
        &self.line_cleared_counter
    }

    /// Records one accepted placement that cleared `cleared_lines` lines.
    pub fn complete_placement(&mut self, cleared_lines: usize) {
        self.placed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines.min(COMBO_BUCKETS - 1)] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_combos_share_last_bucket() {
        let mut stats = GameStats::new();
        stats.complete_placement(4);
        stats.complete_placement(7);
        stats.complete_placement(16);
        assert_eq!(stats.line_cleared_counter(), &[0, 0, 0, 0, 3]);
        assert_eq!(stats.total_cleared_lines(), 27);
        assert_eq!(stats.placed_pieces(), 3);
    }

    #[test]
    fn test_serialize() {
        let mut stats = GameStats::new();
        stats.complete_placement(2);
        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(
            json,
            r#"{"placed_pieces":1,"total_cleared_lines":2,"line_cleared_counter":[0,0,1,0,0]}"#
        );
    }
}
