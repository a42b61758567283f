//! Pieces module - tetromino catalog and piece geometry
//!
//! Each of the seven kinds has a canonical shape: a small square grid whose
//! nonzero cells carry the kind's color id. A live piece is the shape plus
//! its (row, col) anchor on the board and a rotation counter; rotation
//! transforms the grid itself, so the stored shape is always the one in
//! play.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::error::GameError;
use crate::types::{Cell, PieceKind, EMPTY};

/// Largest shape grid side (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Spawn column for the given board width: top row, roughly centered
pub fn spawn_col(board_width: usize) -> i16 {
    board_width as i16 / 2 - 1
}

/// A square grid of shape cells. Always stored in a 4x4 backing array;
/// `size` gives the live NxN region (2 for O, 4 for I, 3 otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Shape {
    size: u8,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

const SHAPE_I: Shape = Shape {
    size: 4,
    cells: [
        [0, 0, 0, 0],
        [1, 1, 1, 1],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const SHAPE_J: Shape = Shape {
    size: 3,
    cells: [
        [2, 0, 0, 0],
        [2, 2, 2, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const SHAPE_L: Shape = Shape {
    size: 3,
    cells: [
        [0, 0, 3, 0],
        [3, 3, 3, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const SHAPE_O: Shape = Shape {
    size: 2,
    cells: [
        [4, 4, 0, 0],
        [4, 4, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const SHAPE_S: Shape = Shape {
    size: 3,
    cells: [
        [0, 5, 5, 0],
        [5, 5, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const SHAPE_T: Shape = Shape {
    size: 3,
    cells: [
        [0, 6, 0, 0],
        [6, 6, 6, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

const SHAPE_Z: Shape = Shape {
    size: 3,
    cells: [
        [7, 7, 0, 0],
        [0, 7, 7, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ],
};

impl Shape {
    /// Canonical (unrotated) shape for a piece kind
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => SHAPE_I,
            PieceKind::J => SHAPE_J,
            PieceKind::L => SHAPE_L,
            PieceKind::O => SHAPE_O,
            PieceKind::S => SHAPE_S,
            PieceKind::T => SHAPE_T,
            PieceKind::Z => SHAPE_Z,
        }
    }

    /// Side length of the live grid
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell value at (row, col) within the live grid
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Iterator over the filled cells as (row, col, color)
    pub fn filled(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let n = self.size();
        (0..n)
            .flat_map(move |row| (0..n).map(move |col| (row, col, self.cells[row][col])))
            .filter(|&(_, _, cell)| cell != EMPTY)
    }

    /// 90-degree clockwise rotation: rotated[col][N-1-row] = cells[row][col]
    pub fn rotated_cw(&self) -> Self {
        let n = self.size();
        let mut rotated = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for row in 0..n {
            for col in 0..n {
                rotated[col][n - 1 - row] = self.cells[row][col];
            }
        }
        Self {
            size: self.size,
            cells: rotated,
        }
    }
}

impl From<Shape> for Vec<Vec<Cell>> {
    fn from(shape: Shape) -> Self {
        let n = shape.size();
        (0..n)
            .map(|row| shape.cells[row][..n].to_vec())
            .collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Shape {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let n = rows.len();
        if !(2..=MAX_SHAPE_SIZE).contains(&n) {
            return Err(GameError::MalformedGrid(format!(
                "shape size {n} out of bounds"
            )));
        }
        let mut cells = [[EMPTY; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(GameError::MalformedGrid(format!(
                    "shape row {row_idx} has {} cells, expected {n}",
                    row.len()
                )));
            }
            for (col_idx, &cell) in row.iter().enumerate() {
                if cell > 7 {
                    return Err(GameError::MalformedGrid(format!(
                        "shape cell value {cell} out of range"
                    )));
                }
                cells[row_idx][col_idx] = cell;
            }
        }
        Ok(Self {
            size: n as u8,
            cells,
        })
    }
}

/// A live piece: kind, current shape grid, board anchor, rotation counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    shape: Shape,
    /// Board row of the shape grid's top-left corner
    pub row: i16,
    /// Board column of the shape grid's top-left corner
    pub col: i16,
    /// Quarter-turns applied so far, 0..=3
    pub rotation: u8,
}

impl Piece {
    /// Fresh piece of the given kind at the spawn anchor, rotation 0
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        Self {
            kind,
            shape: Shape::of(kind),
            row: 0,
            col: spawn_col(board_width),
            rotation: 0,
        }
    }

    /// Current shape grid
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Board cell color this piece locks with
    pub fn color(&self) -> Cell {
        self.kind.color()
    }

    /// True iff any filled shape cell, offset by (row_off, col_off) from the
    /// current anchor, lands outside the board or on a nonzero cell. The
    /// single authority for placement legality.
    pub fn collides(&self, board: &Board, row_off: i16, col_off: i16) -> bool {
        for (row, col, _) in self.shape.filled() {
            let board_row = self.row + row as i16 + row_off;
            let board_col = self.col + col as i16 + col_off;
            if board.get(board_row, board_col) != Some(EMPTY) {
                return true;
            }
        }
        false
    }

    /// Copy of this piece rotated a quarter-turn clockwise, same anchor
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }

    /// Row of the lowest legal position straight down from the current anchor
    pub fn drop_row(&self, board: &Board) -> i16 {
        let mut dist = 0;
        while !self.collides(board, dist + 1, 0) {
            dist += 1;
        }
        self.row + dist
    }

    /// Move the anchor back to the spawn position, keeping shape and rotation
    pub fn move_to_spawn(&mut self, board_width: usize) {
        self.row = 0;
        self.col = spawn_col(board_width);
    }
}
