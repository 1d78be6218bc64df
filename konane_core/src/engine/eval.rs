use crate::engine::Evaluator;
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;

/// Stands in for infinity: a won position. Mobility differences never come close.
pub const WIN_SCORE: i32 = 1_000_000;

/// Scores a position by how many more moves `side` has than its opponent.
///
/// Assumes the side to move has at least one move. When both sides are stuck the opponent
/// check comes first, so `side` scores `WIN_SCORE` even if it is the one to move; searches
/// settle such nodes themselves before calling the evaluator.
#[derive(Default)]
pub struct MobilityEvaluator {
    generator: MoveGenerator,
}

impl MobilityEvaluator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generator: MoveGenerator::new(),
        }
    }
}

impl Evaluator for MobilityEvaluator {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let own = self.generator.generate_moves(board, side).len() as i32;
        let theirs = self.generator.generate_moves(board, side.opponent()).len() as i32;

        if theirs == 0 {
            return WIN_SCORE;
        }
        if own == 0 {
            return -WIN_SCORE;
        }
        own - theirs
    }
}
