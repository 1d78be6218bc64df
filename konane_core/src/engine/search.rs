use crate::engine::config::{EngineConfig, SearchAlgorithm};
use crate::engine::eval::{MobilityEvaluator, WIN_SCORE};
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::board::{Board, Side};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::apply_move;
use std::time::Instant;

/// Infinity score for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1;

/// Everything both tree searches share: the evaluator, node accounting, the depth bound and
/// move selection at the root.
struct SearchCore<E> {
    evaluator: E,
    generator: MoveGenerator,
    depth_limit: u8,
    nodes_searched: u64,
}

impl<E: Evaluator> SearchCore<E> {
    fn new(depth_limit: u8, evaluator: E) -> Self {
        Self {
            evaluator,
            generator: MoveGenerator::new(),
            depth_limit: depth_limit.max(1),
            nodes_searched: 0,
        }
    }

    /// Value of a node with nothing left to search, from `me`'s point of view. A side with no
    /// moves has lost, whatever the evaluator would say about the position.
    fn leaf_value(&self, board: &Board, to_move: Side, me: Side, has_moves: bool) -> i32 {
        if !has_moves {
            return if to_move == me { -WIN_SCORE } else { WIN_SCORE };
        }
        self.evaluator.evaluate(board, me)
    }

    /// Runs `value_of` on every root move and keeps the first one with the strictly greatest
    /// value.
    fn select_root_move<F>(
        &mut self,
        board: &Board,
        side: Side,
        label: &str,
        mut value_of: F,
    ) -> Option<(Move, SearchStats)>
    where
        F: FnMut(&mut Self, &Board) -> i32,
    {
        self.nodes_searched = 0;
        let start = Instant::now();

        let moves = self.generator.generate_moves(board, side);
        let mut best: Option<(Move, i32)> = None;
        for &mv in &moves {
            let child = child_board(board, side, mv);
            let val = value_of(self, &child);
            log::trace!("{label}: root move {mv} backs up {val}");
            if best.is_none_or(|(_, best_val)| val > best_val) {
                best = Some((mv, val));
            }
        }

        let (mv, score) = best?;
        let elapsed = start.elapsed();
        let stats = SearchStats {
            depth: self.depth_limit,
            nodes: self.nodes_searched,
            time_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            score,
        };
        log::debug!(
            "{label} depth {}: chose {mv} score {score} ({} nodes, {} ms)",
            stats.depth,
            stats.nodes,
            stats.time_ms
        );
        Some((mv, stats))
    }
}

/// Every move searched came from the generator for this very board, so a rejection here is a
/// generator/applicator disagreement, not a game event.
fn child_board(board: &Board, side: Side, mv: Move) -> Board {
    apply_move(board, side, &mv)
        .unwrap_or_else(|err| panic!("generated move {mv} rejected for {side:?}: {err}"))
}

/// Plain depth-limited minimax. Visits every node down to the depth limit.
pub struct MinimaxEngine<E = MobilityEvaluator> {
    core: SearchCore<E>,
}

impl MinimaxEngine<MobilityEvaluator> {
    #[must_use]
    pub fn new(depth_limit: u8) -> Self {
        Self::with_evaluator(depth_limit, MobilityEvaluator::new())
    }
}

impl<E: Evaluator> MinimaxEngine<E> {
    #[must_use]
    pub fn with_evaluator(depth_limit: u8, evaluator: E) -> Self {
        Self {
            core: SearchCore::new(depth_limit, evaluator),
        }
    }

    #[must_use]
    pub const fn nodes_searched(&self) -> u64 {
        self.core.nodes_searched
    }

    /// Backed-up value of `board` with `to_move` to play, and the move that achieves it.
    /// Nodes where `to_move == me` maximise, the others minimise.
    pub fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        to_move: Side,
        me: Side,
    ) -> (i32, Option<Move>) {
        minimax_node(&mut self.core, board, depth, to_move, me)
    }
}

fn minimax_node<E: Evaluator>(
    core: &mut SearchCore<E>,
    board: &Board,
    depth: u8,
    to_move: Side,
    me: Side,
) -> (i32, Option<Move>) {
    core.nodes_searched += 1;

    let moves = core.generator.generate_moves(board, to_move);
    if depth >= core.depth_limit || moves.is_empty() {
        return (core.leaf_value(board, to_move, me, !moves.is_empty()), None);
    }

    let maximizing = to_move == me;

    let mut best_val = if maximizing { -INF } else { INF };
    let mut best_move = None;
    for &mv in &moves {
        let child = child_board(board, to_move, mv);
        let (val, _) = minimax_node(core, &child, depth + 1, to_move.opponent(), me);
        let better = if maximizing {
            val > best_val
        } else {
            val < best_val
        };
        if better {
            best_val = val;
            best_move = Some(mv);
        }
    }
    (best_val, best_move)
}

impl<E: Evaluator> Searcher for MinimaxEngine<E> {
    fn search(&mut self, board: &Board, side: Side) -> Option<(Move, SearchStats)> {
        self.core
            .select_root_move(board, side, "Minimax", |core, child| {
                minimax_node(core, child, 1, side.opponent(), side).0
            })
    }

    fn depth_limit(&self) -> u8 {
        self.core.depth_limit
    }

    fn label(&self) -> &'static str {
        "Minimax"
    }
}

/// Minimax with alpha-beta pruning. Returns the same root move and value as
/// [`MinimaxEngine`] for the same depth, visiting fewer nodes.
pub struct AlphaBetaEngine<E = MobilityEvaluator> {
    core: SearchCore<E>,
}

impl AlphaBetaEngine<MobilityEvaluator> {
    #[must_use]
    pub fn new(depth_limit: u8) -> Self {
        Self::with_evaluator(depth_limit, MobilityEvaluator::new())
    }
}

impl<E: Evaluator> AlphaBetaEngine<E> {
    #[must_use]
    pub fn with_evaluator(depth_limit: u8, evaluator: E) -> Self {
        Self {
            core: SearchCore::new(depth_limit, evaluator),
        }
    }

    #[must_use]
    pub const fn nodes_searched(&self) -> u64 {
        self.core.nodes_searched
    }

    /// `alpha` is what max can already guarantee, `beta` what min can. Outside the window the
    /// returned value is only a bound (fail-hard).
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        to_move: Side,
        me: Side,
        alpha: i32,
        beta: i32,
    ) -> (i32, Option<Move>) {
        alpha_beta_node(&mut self.core, board, depth, to_move, me, alpha, beta)
    }
}

fn alpha_beta_node<E: Evaluator>(
    core: &mut SearchCore<E>,
    board: &Board,
    depth: u8,
    to_move: Side,
    me: Side,
    mut alpha: i32,
    mut beta: i32,
) -> (i32, Option<Move>) {
    core.nodes_searched += 1;

    let moves = core.generator.generate_moves(board, to_move);
    if depth >= core.depth_limit || moves.is_empty() {
        return (core.leaf_value(board, to_move, me, !moves.is_empty()), None);
    }

    let mut best_move = None;
    if to_move == me {
        for &mv in &moves {
            let child = child_board(board, to_move, mv);
            let (val, _) =
                alpha_beta_node(core, &child, depth + 1, to_move.opponent(), me, alpha, beta);
            if val > alpha {
                alpha = val;
                best_move = Some(mv);
            }
            if alpha >= beta {
                return (beta, best_move);
            }
        }
        (alpha, best_move)
    } else {
        for &mv in &moves {
            let child = child_board(board, to_move, mv);
            let (val, _) =
                alpha_beta_node(core, &child, depth + 1, to_move.opponent(), me, alpha, beta);
            if val < beta {
                beta = val;
                best_move = Some(mv);
            }
            if beta <= alpha {
                return (alpha, best_move);
            }
        }
        (beta, best_move)
    }
}

impl<E: Evaluator> Searcher for AlphaBetaEngine<E> {
    fn search(&mut self, board: &Board, side: Side) -> Option<(Move, SearchStats)> {
        // Fresh window per root move keeps each root value exact.
        self.core
            .select_root_move(board, side, "AlphaBeta", |core, child| {
                alpha_beta_node(core, child, 1, side.opponent(), side, -INF, INF).0
            })
    }

    fn depth_limit(&self) -> u8 {
        self.core.depth_limit
    }

    fn label(&self) -> &'static str {
        "AlphaBeta"
    }
}

#[must_use]
pub fn build_searcher(config: &EngineConfig) -> Box<dyn Searcher> {
    let depth = config.effective_depth();
    match config.algorithm {
        SearchAlgorithm::Minimax => Box::new(MinimaxEngine::new(depth)),
        SearchAlgorithm::AlphaBeta => Box::new(AlphaBetaEngine::new(depth)),
    }
}
