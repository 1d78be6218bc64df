use crate::engine::Move;
use crate::logic::board::{Board, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every way a move can be illegal. All of them are an invalid move as far as the game is
/// concerned; the variant only says which rule was broken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    OutOfBounds,
    NoPieceAtSource,
    RemovalAfterOpening,
    DiagonalMove,
    OddDistance,
    TargetOccupied,
    MissingCapture,
    BlockedLanding,
    GameOver,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::OutOfBounds => "move leaves the board",
            Self::NoPieceAtSource => "source square does not hold the mover's piece",
            Self::RemovalAfterOpening => "removals are only allowed during the opening",
            Self::DiagonalMove => "jumps must be horizontal or vertical",
            Self::OddDistance => "jump distance must be a positive even number of squares",
            Self::TargetOccupied => "destination square is not empty",
            Self::MissingCapture => "jumped-over square does not hold an opponent piece",
            Self::BlockedLanding => "intermediate landing square is not empty",
            Self::GameOver => "the game is already over",
        };
        write!(f, "invalid move: {reason}")
    }
}

impl std::error::Error for MoveError {}

/// Checks `mv` for `side` and returns the resulting position. `board` is left untouched.
///
/// # Errors
/// Returns the first rule `mv` breaks.
pub fn apply_move(board: &Board, side: Side, mv: &Move) -> Result<Board, MoveError> {
    let from_row = usize::from(mv.from_row);
    let from_col = usize::from(mv.from_col);
    let to_row = usize::from(mv.to_row);
    let to_col = usize::from(mv.to_col);

    let size = board.size();
    if from_row >= size || from_col >= size || to_row >= size || to_col >= size {
        return Err(MoveError::OutOfBounds);
    }
    if board.get_cell(from_row, from_col) != Some(side) {
        return Err(MoveError::NoPieceAtSource);
    }

    let mut next = board.clone();

    if mv.is_removal() {
        if !board.is_opening_state() {
            return Err(MoveError::RemovalAfterOpening);
        }
        next.set_cell(from_row, from_col, None);
        return Ok(next);
    }

    let (dr, dc, dist) = jump_geometry(from_row, from_col, to_row, to_col)?;

    if board.get_cell(to_row, to_col).is_some() {
        return Err(MoveError::TargetOccupied);
    }

    let opponent = Some(side.opponent());
    next.set_cell(from_row, from_col, None);
    for step in 1..dist {
        let (r, c) = step_from(from_row, from_col, dr, dc, step)?;
        if step & 1 == 1 {
            if board.get_cell(r, c) != opponent {
                return Err(MoveError::MissingCapture);
            }
            next.set_cell(r, c, None);
        } else if board.get_cell(r, c).is_some() {
            return Err(MoveError::BlockedLanding);
        }
    }
    next.set_cell(to_row, to_col, Some(side));

    Ok(next)
}

/// Unit direction and length of an axis-aligned jump.
const fn jump_geometry(
    from_row: usize,
    from_col: usize,
    to_row: usize,
    to_col: usize,
) -> Result<(isize, isize, usize), MoveError> {
    let d_row = to_row.abs_diff(from_row);
    let d_col = to_col.abs_diff(from_col);

    if d_row != 0 && d_col != 0 {
        return Err(MoveError::DiagonalMove);
    }
    let dist = d_row + d_col;
    if dist == 0 || dist & 1 == 1 {
        return Err(MoveError::OddDistance);
    }

    let dr = direction(from_row, to_row);
    let dc = direction(from_col, to_col);
    Ok((dr, dc, dist))
}

const fn direction(from: usize, to: usize) -> isize {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}

#[allow(clippy::cast_possible_wrap)]
fn step_from(
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    step: usize,
) -> Result<(usize, usize), MoveError> {
    let r = row
        .checked_add_signed(dr * step as isize)
        .ok_or(MoveError::OutOfBounds)?;
    let c = col
        .checked_add_signed(dc * step as isize)
        .ok_or(MoveError::OutOfBounds)?;
    Ok((r, c))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Opening removals for an 8x8 board already played.
    fn opened_board() -> Board {
        let mut board = Board::new(8);
        board.set_cell(3, 3, None);
        board.set_cell(3, 4, None);
        board
    }

    #[test]
    fn test_single_jump() {
        let mut board = Board::empty(8);
        board.set_cell(2, 2, Some(Side::First));
        board.set_cell(3, 2, Some(Side::Second));

        let next = apply_move(&board, Side::First, &Move::new(2, 2, 4, 2)).unwrap();
        assert_eq!(next.get_cell(2, 2), None);
        assert_eq!(next.get_cell(3, 2), None);
        assert_eq!(next.get_cell(4, 2), Some(Side::First));
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let board = opened_board();
        let before = board.clone();
        let next = apply_move(&board, Side::First, &Move::new(5, 3, 3, 3)).unwrap();
        assert_eq!(board, before);
        assert_ne!(next, board);
        assert_eq!(next.get_cell(3, 3), Some(Side::First));
        assert_eq!(next.get_cell(4, 3), None);
        assert_eq!(next.get_cell(5, 3), None);
    }

    #[test]
    fn test_double_jump() {
        let mut board = Board::empty(8);
        board.set_cell(0, 0, Some(Side::Second));
        board.set_cell(0, 1, Some(Side::First));
        board.set_cell(0, 3, Some(Side::First));

        let next = apply_move(&board, Side::Second, &Move::new(0, 0, 0, 4)).unwrap();
        assert_eq!(next.count_cells(Some(Side::First)), 0);
        assert_eq!(next.get_cell(0, 4), Some(Side::Second));
        assert_eq!(next.count_cells(Some(Side::Second)), 1);
    }

    #[test]
    fn test_opening_removal() {
        let board = Board::new(8);
        let next = apply_move(&board, Side::First, &Move::removal(3, 3)).unwrap();
        assert_eq!(next.get_cell(3, 3), None);
        assert_eq!(next.count_cells(None), 1);

        let next = apply_move(&next, Side::Second, &Move::removal(3, 4)).unwrap();
        assert_eq!(next.count_cells(None), 2);
    }

    #[test]
    fn test_removal_after_opening_is_rejected() {
        let board = opened_board();
        assert_eq!(
            apply_move(&board, Side::First, &Move::removal(0, 0)),
            Err(MoveError::RemovalAfterOpening)
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let board = opened_board();
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(5, 3, 9, 3)),
            Err(MoveError::OutOfBounds)
        );
    }

    #[test]
    fn test_wrong_owner() {
        let board = opened_board();
        // (5,3) is First's piece
        assert_eq!(
            apply_move(&board, Side::Second, &Move::new(5, 3, 3, 3)),
            Err(MoveError::NoPieceAtSource)
        );
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(3, 3, 5, 3)),
            Err(MoveError::NoPieceAtSource)
        );
    }

    #[test]
    fn test_diagonal_is_rejected() {
        let mut board = Board::empty(8);
        board.set_cell(0, 0, Some(Side::First));
        board.set_cell(1, 1, Some(Side::Second));
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(0, 0, 2, 2)),
            Err(MoveError::DiagonalMove)
        );
    }

    #[test]
    fn test_odd_distance_is_rejected() {
        let mut board = Board::empty(8);
        board.set_cell(0, 0, Some(Side::First));
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(0, 0, 0, 3)),
            Err(MoveError::OddDistance)
        );
    }

    #[test]
    fn test_occupied_target() {
        let mut board = Board::new(8);
        board.set_cell(3, 3, None);
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(0, 0, 0, 2)),
            Err(MoveError::TargetOccupied)
        );
    }

    #[test]
    fn test_missing_capture() {
        let mut board = Board::empty(8);
        board.set_cell(0, 0, Some(Side::First));
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(0, 0, 2, 0)),
            Err(MoveError::MissingCapture)
        );
        board.set_cell(1, 0, Some(Side::First));
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(0, 0, 2, 0)),
            Err(MoveError::MissingCapture)
        );
    }

    #[test]
    fn test_blocked_intermediate_landing() {
        let mut board = Board::empty(8);
        board.set_cell(0, 0, Some(Side::First));
        board.set_cell(0, 1, Some(Side::Second));
        board.set_cell(0, 2, Some(Side::Second));
        board.set_cell(0, 3, Some(Side::Second));
        assert_eq!(
            apply_move(&board, Side::First, &Move::new(0, 0, 0, 4)),
            Err(MoveError::BlockedLanding)
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            MoveError::DiagonalMove.to_string(),
            "invalid move: jumps must be horizontal or vertical"
        );
    }
}
