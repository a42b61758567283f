//! Board module - the playfield grid
//!
//! A `height` x `width` grid (defaults 20x10) of `Cell` values stored as a
//! flat row-major array. Row 0 is the top. Cells are 0 (empty) or a piece
//! color id 1..=7.
//!
//! The board serializes as a row-major grid of integers and validates on
//! deserialization: ragged rows, out-of-bounds dimensions, and cell values
//! above 7 are rejected with a structured error instead of producing a
//! corrupt session.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::core::pieces::Piece;
use crate::error::GameError;
use crate::types::{
    Cell, EMPTY, MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH, MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH,
};

/// Indices of rows removed by one compaction pass, top-to-bottom.
///
/// Capacity covers the tallest accepted board: a single placement clears at
/// most 4 rows, but a deserialized board may arrive with arbitrarily many
/// complete rows and compaction must not panic on it.
pub type ClearedRows = ArrayVec<usize, MAX_BOARD_HEIGHT>;

/// The playfield grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat cell array, row-major (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board. Dimensions must already be within the
    /// accepted bounds; the session config validates before constructing.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![EMPTY; width * height],
        }
    }

    /// Board width in columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Board height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Flat index for signed (row, col) coordinates.
    /// Returns None when outside the grid.
    #[inline]
    fn index(&self, row: i16, col: i16) -> Option<usize> {
        if row < 0 || row >= self.height as i16 || col < 0 || col >= self.width as i16 {
            return None;
        }
        Some(row as usize * self.width + col as usize)
    }

    /// Cell at (row, col); None when out of bounds
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Write a cell at (row, col). Returns false when out of bounds.
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True when every cell of the row is nonzero
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height {
            return false;
        }
        let start = row * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(|&cell| cell != EMPTY)
    }

    /// Count of nonzero cells on the board
    pub fn occupied_cells(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Write the piece's filled cells into the board at its current anchor
    /// using the piece color. Cells outside the grid are skipped; legality
    /// is the collision check's job, performed before any placement.
    pub fn merge_piece(&mut self, piece: &Piece) {
        for (row, col, _) in piece.shape().filled() {
            self.set(
                piece.row + row as i16,
                piece.col + col as i16,
                piece.color(),
            );
        }
    }

    /// Remove every complete row, shifting the rows above down and leaving
    /// fresh empty rows at the top. Returns the removed row indices
    /// top-to-bottom; the row count is unchanged.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        let width = self.width;
        let mut write = self.height;

        // Single bottom-up pass: full rows are recorded, the rest compact
        // toward the bottom.
        for read in (0..self.height).rev() {
            if self.is_row_full(read) {
                cleared.push(read);
            } else {
                write -= 1;
                if write != read {
                    let src = read * width;
                    self.cells.copy_within(src..src + width, write * width);
                }
            }
        }

        for cell in &mut self.cells[..write * width] {
            *cell = EMPTY;
        }

        // Recorded bottom-to-top above; callers expect top-to-bottom.
        cleared.reverse();
        cleared
    }
}

impl From<Board> for Vec<Vec<Cell>> {
    fn from(board: Board) -> Self {
        board
            .cells
            .chunks(board.width)
            .map(|row| row.to_vec())
            .collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let height = rows.len();
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&height) {
            return Err(GameError::MalformedGrid(format!(
                "board height {height} out of bounds"
            )));
        }
        let width = rows[0].len();
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&width) {
            return Err(GameError::MalformedGrid(format!(
                "board width {width} out of bounds"
            )));
        }

        let mut cells = Vec::with_capacity(width * height);
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GameError::MalformedGrid(format!(
                    "row {row_idx} has {} cells, expected {width}",
                    row.len()
                )));
            }
            for &cell in row {
                if cell > 7 {
                    return Err(GameError::MalformedGrid(format!(
                        "cell value {cell} out of range"
                    )));
                }
                cells.push(cell);
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }
}
