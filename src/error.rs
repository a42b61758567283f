//! Error types for the service
//!
//! Illegal moves (collision, hold already used) are not errors: the engine
//! reports them as unsuccessful move outcomes. `GameError` covers the
//! session-layer failures: unknown games, moves against finished or paused
//! sessions, and malformed input.

use thiserror::Error;

use crate::types::{GameId, GameStatus};

/// Result type alias for session and store operations
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors surfaced by the session layer and store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// No session with the given id exists in the store
    #[error("game {0} not found")]
    NotFound(GameId),

    /// A move was submitted against a paused or finished session
    #[error("game is not ongoing (status: {0})")]
    NotOngoing(GameStatus),

    /// Pause or forfeit requested on a session that already ended
    #[error("game already finished")]
    AlreadyFinished,

    /// Session creation parameters out of bounds
    #[error("invalid game config: {0}")]
    InvalidConfig(String),

    /// A board or shape grid failed validation on deserialization
    #[error("malformed grid: {0}")]
    MalformedGrid(String),
}

impl GameError {
    /// Stable machine-readable code for the wire protocol
    pub fn code(&self) -> &'static str {
        match self {
            GameError::NotFound(_) => "not_found",
            GameError::NotOngoing(_) => "not_ongoing",
            GameError::AlreadyFinished => "already_finished",
            GameError::InvalidConfig(_) => "invalid_config",
            GameError::MalformedGrid(_) => "malformed_grid",
        }
    }
}
