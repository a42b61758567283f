//! Core module - the pure move-processing engine
//!
//! Game rules only: piece catalog, board geometry, the per-move state
//! transition, and scoring tables. No I/O, no persistence, no transport.

pub mod board;
pub mod moves;
pub mod pieces;
pub mod rng;
pub mod scoring;

// Re-export commonly used types
pub use board::{Board, ClearedRows};
pub use moves::{process_move, spawn_blocked, HoldBehavior, MoveFailure, MoveOutcome};
pub use pieces::{spawn_col, Piece, Shape};
pub use rng::PieceRng;
pub use scoring::{level_for_lines, line_clear_score};
