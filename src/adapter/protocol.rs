//! Protocol module - JSON message types for the game API
//!
//! Line-delimited JSON over TCP: each request line is one tagged object,
//! each response line one tagged object. Unknown move names and malformed
//! JSON are rejected at parse time with an error response; nothing
//! unrecognized reaches the engine.

use serde::{Deserialize, Serialize};

use crate::core::{Board, Piece};
use crate::service::{GameSummary, HighScore};
use crate::session::{GameConfig, GameSession};
use crate::types::{GameId, GameStatus, MoveKind};

fn default_leaderboard_limit() -> usize {
    10
}

/// Client requests, tagged by `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Start a new game; omitted fields use the defaults (10x20, level 1)
    Create {
        #[serde(flatten)]
        config: GameConfig,
    },
    /// Fetch the current state of a game
    Status { game_id: GameId },
    /// Apply one move to a game
    Move {
        game_id: GameId,
        #[serde(rename = "move")]
        kind: MoveKind,
        #[serde(default)]
        clear_hold: bool,
        #[serde(default)]
        skip_store: bool,
    },
    /// Pause or resume a game
    Pause { game_id: GameId, paused: bool },
    /// Give up a game, ending it immediately
    Forfeit { game_id: GameId },
    /// Fetch the best recorded scores
    Leaderboard {
        #[serde(default = "default_leaderboard_limit")]
        limit: usize,
    },
}

/// Full session view shared by status and move responses
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    pub game_id: GameId,
    pub status: GameStatus,
    pub board: Board,
    pub current_piece: Piece,
    pub next_piece: Piece,
    pub held_piece: Option<Piece>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
}

impl GameView {
    pub fn new(game_id: GameId, session: &GameSession) -> Self {
        Self {
            game_id,
            status: session.status,
            board: session.board.clone(),
            current_piece: session.current,
            next_piece: session.next,
            held_piece: session.held,
            can_hold: session.can_hold,
            score: session.score,
            level: session.level,
            lines_cleared: session.lines_cleared,
        }
    }
}

/// Server responses, tagged by `type`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Created {
        game_id: GameId,
        width: usize,
        height: usize,
        level: u32,
        message: &'static str,
    },
    Game {
        game: GameView,
    },
    Moved {
        success: bool,
        message: &'static str,
        placed: bool,
        cleared_lines: Vec<usize>,
        score_delta: u32,
        game: GameView,
    },
    Paused {
        game_id: GameId,
        status: GameStatus,
        message: &'static str,
    },
    Finished {
        #[serde(flatten)]
        summary: GameSummary,
    },
    Leaderboard {
        scores: Vec<HighScore>,
    },
    Error {
        error: &'static str,
        message: String,
    },
}
