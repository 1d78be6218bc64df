use crate::logic::board::{Board, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod search;

/// A removal (opening) when both endpoints coincide, otherwise a straight-line jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Move {
    pub from_row: u8,
    pub from_col: u8,
    pub to_row: u8,
    pub to_col: u8,
}

impl Move {
    #[must_use]
    pub const fn new(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Self {
        Self {
            from_row,
            from_col,
            to_row,
            to_col,
        }
    }

    #[must_use]
    pub const fn removal(row: u8, col: u8) -> Self {
        Self::new(row, col, row, col)
    }

    #[must_use]
    pub const fn is_removal(&self) -> bool {
        self.from_row == self.to_row && self.from_col == self.to_col
    }

    /// Opponent pieces taken by this move, assuming it is legal.
    #[must_use]
    pub const fn captured_count(&self) -> usize {
        let dist = self.from_row.abs_diff(self.to_row) as usize
            + self.from_col.abs_diff(self.to_col) as usize;
        dist / 2
    }
}

/// 1-indexed, the way moves are shown to players.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{},{},{}]",
            u16::from(self.from_row) + 1,
            u16::from(self.from_col) + 1,
            u16::from(self.to_row) + 1,
            u16::from(self.to_col) + 1
        )
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u64,
    pub time_ms: u64,
    /// Backed-up value of the chosen move, from the searcher's point of view.
    pub score: i32,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

pub trait Searcher {
    /// Picks a move for `side`. `None` means `side` has nothing legal and must concede.
    fn search(&mut self, board: &Board, side: Side) -> Option<(Move, SearchStats)>;

    fn depth_limit(&self) -> u8;

    fn label(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_display_is_one_indexed() {
        assert_eq!(Move::removal(3, 3).to_string(), "[4,4,4,4]");
        assert_eq!(Move::new(2, 2, 4, 2).to_string(), "[3,3,5,3]");
    }

    #[test]
    fn test_captured_count() {
        assert_eq!(Move::removal(0, 0).captured_count(), 0);
        assert_eq!(Move::new(2, 2, 4, 2).captured_count(), 1);
        assert_eq!(Move::new(0, 6, 0, 0).captured_count(), 3);
    }
}
