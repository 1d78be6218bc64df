use crate::engine::Move;
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{apply_move, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Won(Side), // Winner
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Side,
    pub status: GameStatus,
    pub last_move: Option<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(8)
    }
}

impl GameState {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            board: Board::new(size),
            turn: Side::First,
            status: GameStatus::Playing,
            last_move: None,
        }
    }

    /// Plays `mv` for the side to move. On error nothing changes.
    ///
    /// # Errors
    /// [`MoveError::GameOver`] once the game has a winner, otherwise whatever rule `mv` breaks.
    pub fn make_move(&mut self, mv: &Move) -> Result<(), MoveError> {
        if self.status != GameStatus::Playing {
            return Err(MoveError::GameOver);
        }

        let next_board = apply_move(&self.board, self.turn, mv)?;

        self.board = next_board;
        self.turn = self.turn.opponent();
        self.last_move = Some(*mv);

        self.update_status();

        Ok(())
    }

    fn update_status(&mut self) {
        let generator = MoveGenerator::new();
        if !generator.has_legal_moves(&self.board, self.turn) {
            // Having no jump available is a loss for the side to move.
            self.status = GameStatus::Won(self.turn.opponent());
        }
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Side> {
        match self.status {
            GameStatus::Playing => None,
            GameStatus::Won(side) => Some(side),
        }
    }
}
