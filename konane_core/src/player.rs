use crate::engine::config::EngineConfig;
use crate::engine::search::build_searcher;
use crate::engine::{Move, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything the game loop can ask for a move.
pub trait Player {
    fn name(&self) -> &str;

    /// Called once before every game with the side this player will play.
    fn initialize(&mut self, side: Side);

    /// `None` concedes the game.
    fn get_move(&mut self, board: &Board) -> Option<Move>;

    /// Statistics of the search behind the most recent move, for players that search.
    fn last_stats(&self) -> Option<SearchStats> {
        None
    }
}

/// Cumulative results. Only the game loop updates it, and only [`PlayerRecord::reset`] clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wins: 0,
            losses: 0,
        }
    }

    pub const fn won(&mut self) {
        self.wins += 1;
    }

    pub const fn lost(&mut self) {
        self.losses += 1;
    }

    pub const fn reset(&mut self) {
        self.wins = 0;
        self.losses = 0;
    }

    #[must_use]
    pub const fn games(&self) -> u32 {
        self.wins + self.losses
    }
}

impl fmt::Display for PlayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Wins:{} Losses:{}", self.name, self.wins, self.losses)
    }
}

/// Always plays the first generated move.
pub struct FixedFirstPlayer {
    side: Side,
    generator: MoveGenerator,
}

impl Default for FixedFirstPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedFirstPlayer {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            side: Side::First,
            generator: MoveGenerator::new(),
        }
    }
}

impl Player for FixedFirstPlayer {
    fn name(&self) -> &str {
        "Simple"
    }

    fn initialize(&mut self, side: Side) {
        self.side = side;
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        self.generator
            .generate_moves(board, self.side)
            .first()
            .copied()
    }
}

/// Uniformly random choice among the legal moves.
pub struct RandomPlayer {
    side: Side,
    generator: MoveGenerator,
    rng: StdRng,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Reproducible sequence of choices.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    const fn from_rng(rng: StdRng) -> Self {
        Self {
            side: Side::First,
            generator: MoveGenerator::new(),
            rng,
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "Random"
    }

    fn initialize(&mut self, side: Side) {
        self.side = side;
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        let moves = self.generator.generate_moves(board, self.side);
        moves.choose(&mut self.rng).copied()
    }
}

/// Delegates move choice to a tree search.
pub struct SearchPlayer {
    side: Side,
    name: String,
    searcher: Box<dyn Searcher>,
    last_stats: Option<SearchStats>,
}

impl SearchPlayer {
    #[must_use]
    pub fn new(searcher: Box<dyn Searcher>) -> Self {
        let name = format!("{} {}", searcher.label(), searcher.depth_limit());
        Self {
            side: Side::First,
            name,
            searcher,
            last_stats: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(build_searcher(config))
    }
}

impl Player for SearchPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self, side: Side) {
        self.side = side;
        self.last_stats = None;
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        let (mv, stats) = self.searcher.search(board, self.side)?;
        self.last_stats = Some(stats);
        Some(mv)
    }

    fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }
}
