use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_BOARD_SIZE: usize = 2;
pub const MAX_BOARD_SIZE: usize = 26;

pub const EMPTY_SYMBOL: char = '.';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }

    /// Character used for this side's pieces when a board is printed.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::First => 'X',
            Self::Second => 'O',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Contents of one square. `None` is an empty square.
pub type Cell = Option<Side>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    // Row-major, size * size entries
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(8)
    }
}

impl Board {
    /// Starting position: a full checkerboard, First on every square with an even `row + col`.
    ///
    /// Sizes outside `MIN_BOARD_SIZE..=MAX_BOARD_SIZE` are clamped into that range.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let mut board = Self::empty(size);
        board.setup_initial_position();
        board
    }

    /// A board of the given size with no pieces on it. Used to build test positions.
    #[must_use]
    pub fn empty(size: usize) -> Self {
        let size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    fn setup_initial_position(&mut self) {
        let size = self.size;
        for (sq, cell) in self.cells.iter_mut().enumerate() {
            let (r, c) = (sq / size, sq % size);
            *cell = Some(if (r + c) & 1 == 0 {
                Side::First
            } else {
                Side::Second
            });
        }
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub const fn square_index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[must_use]
    pub const fn index_to_coord(&self, sq: usize) -> (usize, usize) {
        (sq / self.size, sq % self.size)
    }

    /// Signed so callers can probe one step past an edge without underflow.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn is_in_bounds(&self, row: isize, col: isize) -> bool {
        let size = self.size as isize;
        row >= 0 && col >= 0 && row < size && col < size
    }

    /// Reads a square. Squares off the board read as empty.
    #[must_use]
    pub fn get_cell(&self, row: usize, col: usize) -> Cell {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(self.square_index(row, col)).copied().flatten()
    }

    /// True iff `(row, col)` is on the board and holds exactly `expected`.
    #[must_use]
    pub fn contains(&self, row: isize, col: isize, expected: Cell) -> bool {
        if !self.is_in_bounds(row, col) {
            return false;
        }
        #[allow(clippy::cast_sign_loss)]
        let sq = self.square_index(row as usize, col as usize);
        self.cells.get(sq).is_some_and(|&cell| cell == expected)
    }

    /// Writes a square. Writes off the board are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) {
        if row >= self.size || col >= self.size {
            return;
        }
        let sq = self.square_index(row, col);
        if let Some(slot) = self.cells.get_mut(sq) {
            *slot = cell;
        }
    }

    #[must_use]
    pub fn count_cells(&self, value: Cell) -> usize {
        self.cells.iter().filter(|&&cell| cell == value).count()
    }

    /// Neither removal has been played yet, or only the first one has.
    #[must_use]
    pub fn is_opening_state(&self) -> bool {
        self.count_cells(None) <= 1
    }

    /// Coordinates of every piece owned by `side`, in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, &cell)| cell == Some(side))
            .map(move |(sq, _)| self.index_to_coord(sq))
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.size)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..self.size {
            write!(f, "{} ", c + 1)?;
        }
        writeln!(f)?;
        for (r, row) in self.rows().enumerate() {
            write!(f, "{} ", r + 1)?;
            for cell in row {
                let symbol = cell.map_or(EMPTY_SYMBOL, Side::symbol);
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_setup() {
        for size in [4, 6, 8, 10] {
            let board = Board::new(size);
            assert_eq!(board.count_cells(Some(Side::First)), size * size / 2);
            assert_eq!(board.count_cells(Some(Side::Second)), size * size / 2);
            assert_eq!(board.count_cells(None), 0);
        }
    }

    #[test]
    fn test_checkerboard_pattern() {
        let board = Board::new(8);
        for r in 0..8 {
            for c in 0..8 {
                let expected = if (r + c) % 2 == 0 {
                    Side::First
                } else {
                    Side::Second
                };
                assert_eq!(board.get_cell(r, c), Some(expected), "cell ({r},{c})");
            }
        }
    }

    #[test]
    fn test_opponent_is_involution() {
        for side in [Side::First, Side::Second] {
            assert_ne!(side.opponent(), side);
            assert_eq!(side.opponent().opponent(), side);
        }
    }

    #[test]
    fn test_contains_out_of_bounds_is_false() {
        let board = Board::new(4);
        assert!(board.contains(0, 0, Some(Side::First)));
        assert!(!board.contains(-1, 0, Some(Side::First)));
        assert!(!board.contains(0, 4, None));
        assert!(!board.contains(4, 4, Some(Side::First)));
        assert_eq!(board.get_cell(9, 9), None);
    }

    #[test]
    fn test_set_cell_ignores_off_board_writes() {
        let mut board = Board::new(4);
        board.set_cell(0, 5, None);
        board.set_cell(1, 1, None);
        assert_eq!(board.count_cells(None), 1);
        assert!(board.is_opening_state());
        board.set_cell(1, 2, None);
        assert!(!board.is_opening_state());
    }

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(Board::new(0).size(), MIN_BOARD_SIZE);
        assert_eq!(Board::new(1000).size(), MAX_BOARD_SIZE);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(4);
        board.set_cell(1, 1, None);
        assert_eq!(
            board.to_string(),
            "  1 2 3 4 \n1 X O X O \n2 O . O X \n3 X O X O \n4 O X O X \n"
        );
    }
}
