//! Match scoring and terminal-state tracking.

use serde::{Deserialize, Serialize};

use crate::combatant::Side;

/// Per-side scores and the terminal game-over state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MatchState {
    /// Side A's score.
    pub score_a: u32,
    /// Side B's score.
    pub score_b: u32,
    /// Set once, never cleared except by match reset.
    pub game_over: bool,
    /// Winning side once the match is decided.
    pub winner: Option<Side>,
}

impl MatchState {
    /// Fresh match state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Score for one side.
    #[must_use]
    pub const fn score(&self, side: Side) -> u32 {
        match side {
            Side::A => self.score_a,
            Side::B => self.score_b,
        }
    }

    /// Credit points to a side. Scores only ever increase.
    pub fn add_score(&mut self, side: Side, points: u32) {
        match side {
            Side::A => self.score_a = self.score_a.saturating_add(points),
            Side::B => self.score_b = self.score_b.saturating_add(points),
        }
    }

    /// Evaluate the win condition from per-side living counts. Returns
    /// the winner on the tick the match ends, `None` otherwise.
    ///
    /// Side A's extinction is tested first, so a simultaneous wipeout
    /// crowns side B.
    pub fn evaluate(&mut self, alive_a: usize, alive_b: usize) -> Option<Side> {
        if self.game_over || (alive_a > 0 && alive_b > 0) {
            return None;
        }
        self.game_over = true;
        let winner = if alive_a == 0 { Side::B } else { Side::A };
        self.winner = Some(winner);
        tracing::info!(winner = winner.label(), "Match over");
        Some(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_accumulate() {
        let mut state = MatchState::new();
        state.add_score(Side::A, 1);
        state.add_score(Side::A, 2);
        state.add_score(Side::B, 2);
        assert_eq!(state.score(Side::A), 3);
        assert_eq!(state.score(Side::B), 2);
    }

    #[test]
    fn test_winner_declared_once() {
        let mut state = MatchState::new();
        assert_eq!(state.evaluate(3, 2), None);
        assert_eq!(state.evaluate(3, 0), Some(Side::A));
        assert!(state.game_over);
        // Later evaluations never re-declare
        assert_eq!(state.evaluate(0, 0), None);
        assert_eq!(state.winner, Some(Side::A));
    }

    #[test]
    fn test_simultaneous_wipeout_favors_b() {
        let mut state = MatchState::new();
        assert_eq!(state.evaluate(0, 0), Some(Side::B));
        assert_eq!(state.winner, Some(Side::B));
    }
}
