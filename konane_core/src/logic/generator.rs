use crate::engine::Move;
use crate::logic::board::{Board, Side};

/// Up, right, down, left. Generation order follows this array.
const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub struct MoveGenerator;

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// All legal moves for `side`, in a fixed order: pieces row-major, then direction, then
    /// jump length. An empty list means `side` has lost.
    #[must_use]
    pub fn generate_moves(&self, board: &Board, side: Side) -> Vec<Move> {
        if board.is_opening_state() {
            return vec![Self::opening_move(board, side)];
        }

        let mut moves = Vec::with_capacity(32);
        for (r, c) in board.pieces(side) {
            for &dir in &DIRECTIONS {
                Self::generate_jumps(board, r, c, dir, side, &mut moves);
            }
        }
        moves
    }

    /// Checks if `side` has at least one legal move.
    /// Returns as soon as a single jump is found.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn has_legal_moves(&self, board: &Board, side: Side) -> bool {
        if board.is_opening_state() {
            return true;
        }

        let opponent = Some(side.opponent());
        board.pieces(side).any(|(r, c)| {
            DIRECTIONS.iter().any(|&(dr, dc)| {
                let (r, c) = (r as isize, c as isize);
                board.contains(r + dr, c + dc, opponent)
                    && board.contains(r + 2 * dr, c + 2 * dc, None)
            })
        })
    }

    /// The fixed removal for each side. First takes the upper-left centre square, Second the
    /// square to its right.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn opening_move(board: &Board, side: Side) -> Move {
        let centre = board.size() / 2;
        let row = centre.saturating_sub(1);
        let col = match side {
            Side::First => centre.saturating_sub(1),
            Side::Second => centre,
        };
        Move::removal(row as u8, col as u8)
    }

    // Jump length k is legal when the square 2k-1 away holds the opponent and the square
    // 2k away is empty, for every length up to k.
    #[allow(
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn generate_jumps(
        board: &Board,
        row: usize,
        col: usize,
        (dr, dc): (isize, isize),
        side: Side,
        moves: &mut Vec<Move>,
    ) {
        let opponent = Some(side.opponent());
        let (r0, c0) = (row as isize, col as isize);

        let mut k = 1;
        loop {
            let (over_r, over_c) = (r0 + dr * (2 * k - 1), c0 + dc * (2 * k - 1));
            let (land_r, land_c) = (r0 + dr * 2 * k, c0 + dc * 2 * k);
            if !(board.contains(over_r, over_c, opponent) && board.contains(land_r, land_c, None)) {
                break;
            }
            moves.push(Move::new(row as u8, col as u8, land_r as u8, land_c as u8));
            k += 1;
        }
    }
}

/// Shorthand for `MoveGenerator::new().generate_moves(board, side)`.
#[must_use]
pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
    MoveGenerator::new().generate_moves(board, side)
}
