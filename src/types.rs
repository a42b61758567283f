//! Core types shared across the service
//!
//! Pure data types only: piece kinds, move kinds, session status, the board
//! cell encoding, and the dimension bounds the session layer validates
//! against. No game logic lives here.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default board dimensions (columns x rows)
pub const DEFAULT_BOARD_WIDTH: usize = 10;
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Accepted board dimension bounds for session creation and deserialization
pub const MIN_BOARD_WIDTH: usize = 4;
pub const MAX_BOARD_WIDTH: usize = 32;
pub const MIN_BOARD_HEIGHT: usize = 8;
pub const MAX_BOARD_HEIGHT: usize = 64;

/// Starting level bounds
pub const MIN_START_LEVEL: u32 = 1;
pub const MAX_START_LEVEL: u32 = 20;
pub const DEFAULT_START_LEVEL: u32 = 1;

/// Cell on the board or in a shape grid: 0 = empty, 1..=7 = piece color
pub type Cell = u8;

/// The empty cell value
pub const EMPTY: Cell = 0;

/// Identifier of a game session in the store
pub type GameId = u64;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All seven kinds, in color order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color id written into board cells when this kind locks.
    /// Each kind owns exactly one nonzero cell value.
    pub fn color(&self) -> Cell {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Kind owning the given nonzero cell value
    pub fn from_color(color: Cell) -> Option<Self> {
        match color {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Side length of this kind's shape grid
    pub fn grid_size(&self) -> usize {
        match self {
            PieceKind::I => 4,
            PieceKind::O => 2,
            _ => 3,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "I" => Some(PieceKind::I),
            "J" => Some(PieceKind::J),
            "L" => Some(PieceKind::L),
            "O" => Some(PieceKind::O),
            "S" => Some(PieceKind::S),
            "T" => Some(PieceKind::T),
            "Z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to the canonical uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Player moves accepted by the engine.
///
/// A closed set: unknown move strings are rejected at the protocol parse
/// layer and never reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Left,
    Right,
    Down,
    Rotate,
    /// Instant drop to the floor; same board effect as `HardDrop`, no score bonus
    Drop,
    HardDrop,
    Hold,
}

impl MoveKind {
    /// Parse move kind from its wire name
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "left" => Some(MoveKind::Left),
            "right" => Some(MoveKind::Right),
            "down" => Some(MoveKind::Down),
            "rotate" => Some(MoveKind::Rotate),
            "drop" => Some(MoveKind::Drop),
            "hard_drop" => Some(MoveKind::HardDrop),
            "hold" => Some(MoveKind::Hold),
            _ => None,
        }
    }

    /// Convert to the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            MoveKind::Left => "left",
            MoveKind::Right => "right",
            MoveKind::Down => "down",
            MoveKind::Rotate => "rotate",
            MoveKind::Drop => "drop",
            MoveKind::HardDrop => "hard_drop",
            MoveKind::Hold => "hold",
        }
    }
}

/// Lifecycle of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Paused,
    GameOver,
}

impl GameStatus {
    /// Convert to the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "game_over",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
