//! Survival-time leaderboard
//!
//! Tracks the top 10 longest runs, each tagged with three player initials.

use serde::{Deserialize, Serialize};

/// Maximum number of scores to keep
pub const MAX_SCORES: usize = 10;

/// Number of initials on an entry
pub const INITIALS_LEN: usize = 3;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Three uppercase initials
    pub initials: String,
    /// Survival time in seconds
    pub time: f32,
}

/// Survival-time leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Scoreboard {
    pub entries: Vec<ScoreEntry>,
}

impl Scoreboard {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a survival time qualifies for the leaderboard
    pub fn qualifies(&self, time: f32) -> bool {
        if self.entries.len() < MAX_SCORES {
            return true;
        }
        // Must beat the lowest entry outright; a tie does not displace it
        self.entries.last().map(|e| time > e.time).unwrap_or(true)
    }

    /// Add a survival time to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add_score(&mut self, initials: String, time: f32) -> Option<usize> {
        if !self.qualifies(time) {
            return None;
        }

        let entry = ScoreEntry { initials, time };

        // Find insertion point (sorted descending by time)
        let pos = self.entries.iter().position(|e| time > e.time);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the longest run (if any)
    pub fn top_time(&self) -> Option<f32> {
        self.entries.first().map(|e| e.time)
    }
}

/// Format a survival time as MM:SS
pub fn format_time(seconds: f32) -> String {
    let total = seconds.max(0.0) as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_board() -> Scoreboard {
        let mut board = Scoreboard::new();
        for i in 0..MAX_SCORES {
            board.add_score("AAA".into(), 1100.0 - i as f32 * 100.0);
        }
        board
    }

    #[test]
    fn test_qualifies_while_not_full() {
        let mut board = Scoreboard::new();
        board.add_score("AAA".into(), 500.0);
        assert!(board.qualifies(0.0));
    }

    #[test]
    fn test_full_board_requires_strictly_beating_lowest() {
        let board = full_board();
        assert_eq!(board.entries.last().map(|e| e.time), Some(200.0));
        assert!(!board.qualifies(125.4));
        assert!(!board.qualifies(200.0));
        assert!(board.qualifies(200.1));
    }

    #[test]
    fn test_add_score_keeps_descending_order_and_cap() {
        let mut board = full_board();
        let rank = board.add_score("ZZZ".into(), 650.0);
        assert_eq!(rank, Some(6));
        assert_eq!(board.entries.len(), MAX_SCORES);
        assert!(
            board
                .entries
                .windows(2)
                .all(|pair| pair[0].time >= pair[1].time)
        );
        // The former lowest entry fell off
        assert_eq!(board.entries.last().map(|e| e.time), Some(300.0));
    }

    #[test]
    fn test_add_score_rejects_non_qualifying_time() {
        let mut board = full_board();
        assert_eq!(board.add_score("BBB".into(), 150.0), None);
        assert_eq!(board.entries.len(), MAX_SCORES);
    }

    #[test]
    fn test_format_time_pads_both_components() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(59.9), "00:59");
        assert_eq!(format_time(125.4), "02:05");
        assert_eq!(format_time(600.0), "10:00");
        assert_eq!(format_time(-3.0), "00:00");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_board_stays_sorted_and_capped(
                times in proptest::collection::vec(0.0f32..2000.0, 0..40)
            ) {
                let mut board = Scoreboard::new();
                for time in times {
                    if let Some(rank) = board.add_score("PPP".into(), time) {
                        prop_assert!((1..=MAX_SCORES).contains(&rank));
                    }
                    prop_assert!(board.entries.len() <= MAX_SCORES);
                    prop_assert!(
                        board.entries.windows(2).all(|p| p[0].time >= p[1].time)
                    );
                }
            }
        }
    }
}
