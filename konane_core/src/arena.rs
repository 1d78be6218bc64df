use crate::engine::{Move, SearchStats};
use crate::logic::board::{Board, Side};
use crate::logic::game::GameState;
use crate::logic::rules::MoveError;
use crate::player::{Player, PlayerRecord};
use serde::Serialize;
use std::fmt;

/// Hooks into a running game. Every method defaults to doing nothing.
pub trait GameObserver {
    fn game_started(&mut self, _board: &Board, _first: &str, _second: &str) {}

    /// Called before the side to move is asked for its move.
    fn turn_started(&mut self, _board: &Board, _side: Side) {}

    /// `board` is the position after `mv`.
    fn move_played(&mut self, _side: Side, _mv: &Move, _board: &Board) {}

    /// Follows `move_played` when the mover searched for its move.
    fn search_reported(&mut self, _side: Side, _stats: &SearchStats) {}

    fn game_finished(&mut self, _outcome: &GameOutcome) {}
}

/// Observer for unattended games.
pub struct NullObserver;

impl GameObserver for NullObserver {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EndReason {
    /// The loser had no legal move left.
    NoLegalMoves,
    /// The loser returned no move.
    Conceded,
    /// The loser produced a move the rules reject.
    InvalidMove(MoveError),
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLegalMoves => write!(f, "no legal moves"),
            Self::Conceded => write!(f, "conceded"),
            Self::InvalidMove(err) => write!(f, "{err}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameOutcome {
    pub winner: Side,
    pub reason: EndReason,
    /// Moves accepted before the game ended, opening removals included.
    pub plies: u32,
    pub final_board: Board,
}

impl GameOutcome {
    #[must_use]
    pub const fn loser(&self) -> Side {
        self.winner.opponent()
    }
}

/// A player together with the record the game loop keeps for it.
pub struct Competitor {
    pub player: Box<dyn Player>,
    pub record: PlayerRecord,
}

impl Competitor {
    #[must_use]
    pub fn new(player: Box<dyn Player>) -> Self {
        let record = PlayerRecord::new(player.name());
        Self { player, record }
    }
}

/// Plays a single game from a fresh board. `first` plays [`Side::First`].
pub fn play_one_game(
    size: usize,
    first: &mut dyn Player,
    second: &mut dyn Player,
    observer: &mut dyn GameObserver,
) -> GameOutcome {
    let mut game = GameState::new(size);
    first.initialize(Side::First);
    second.initialize(Side::Second);
    observer.game_started(&game.board, first.name(), second.name());

    let mut plies = 0;
    let (winner, reason) = loop {
        let side = game.turn;
        if let Some(winner) = game.winner() {
            break (winner, EndReason::NoLegalMoves);
        }

        let player: &mut dyn Player = match side {
            Side::First => &mut *first,
            Side::Second => &mut *second,
        };
        observer.turn_started(&game.board, side);

        let Some(mv) = player.get_move(&game.board) else {
            break (side.opponent(), EndReason::Conceded);
        };
        if let Err(err) = game.make_move(&mv) {
            log::warn!("{} ({side}) played {mv}: {err}", player.name());
            break (side.opponent(), EndReason::InvalidMove(err));
        }
        plies += 1;
        observer.move_played(side, &mv, &game.board);
        if let Some(stats) = player.last_stats() {
            observer.search_reported(side, &stats);
        }
    };

    let outcome = GameOutcome {
        winner,
        reason,
        plies,
        final_board: game.board,
    };
    let winner_name = match winner {
        Side::First => first.name(),
        Side::Second => second.name(),
    };
    log::info!(
        "{winner_name} ({winner}) wins after {plies} plies: {}",
        outcome.reason
    );
    observer.game_finished(&outcome);
    outcome
}

/// Plays `n` games, `a` moving first in even-numbered games and `b` in odd ones, and updates
/// both records.
pub fn play_n_games(
    size: usize,
    n: u32,
    a: &mut Competitor,
    b: &mut Competitor,
    observer: &mut dyn GameObserver,
) -> Vec<GameOutcome> {
    let mut outcomes = Vec::new();
    let (mut first, mut second) = (a, b);
    for _ in 0..n {
        let outcome = play_one_game(
            size,
            first.player.as_mut(),
            second.player.as_mut(),
            observer,
        );
        match outcome.winner {
            Side::First => {
                first.record.won();
                second.record.lost();
            }
            Side::Second => {
                first.record.lost();
                second.record.won();
            }
        }
        outcomes.push(outcome);
        std::mem::swap(&mut first, &mut second);
    }
    outcomes
}
