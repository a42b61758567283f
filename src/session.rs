//! Session module - one game's persisted state and move orchestration
//!
//! A `GameSession` is the snapshot the store persists between moves: board,
//! live pieces, hold state, score, level, cleared-line count, status, and
//! the piece generator. `apply_move` drives the engine and then runs the
//! post-placement pipeline (line clear, score, level, game-over detection)
//! that the engine itself deliberately leaves to its caller.

use serde::{Deserialize, Serialize};

use crate::core::{
    level_for_lines, line_clear_score, process_move, spawn_blocked, Board, ClearedRows,
    HoldBehavior, Piece, PieceRng,
};
use crate::error::{GameError, Result};
use crate::types::{
    GameStatus, MoveKind, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_START_LEVEL,
    MAX_BOARD_HEIGHT, MAX_BOARD_WIDTH, MAX_START_LEVEL, MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH,
    MIN_START_LEVEL,
};

/// Parameters for a new game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub start_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            start_level: DEFAULT_START_LEVEL,
        }
    }
}

impl GameConfig {
    /// Reject out-of-bounds dimensions and levels before any state exists
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BOARD_WIDTH..=MAX_BOARD_WIDTH).contains(&self.width) {
            return Err(GameError::InvalidConfig(format!(
                "width {} out of bounds ({MIN_BOARD_WIDTH}..={MAX_BOARD_WIDTH})",
                self.width
            )));
        }
        if !(MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&self.height) {
            return Err(GameError::InvalidConfig(format!(
                "height {} out of bounds ({MIN_BOARD_HEIGHT}..={MAX_BOARD_HEIGHT})",
                self.height
            )));
        }
        if !(MIN_START_LEVEL..=MAX_START_LEVEL).contains(&self.start_level) {
            return Err(GameError::InvalidConfig(format!(
                "start level {} out of bounds ({MIN_START_LEVEL}..={MAX_START_LEVEL})",
                self.start_level
            )));
        }
        Ok(())
    }
}

/// What one applied move did, beyond the new session state
#[derive(Debug, Clone, PartialEq)]
pub struct MoveReport {
    pub success: bool,
    /// A piece locked onto the board during this move
    pub placed: bool,
    /// Rows removed by the post-placement compaction, top-to-bottom
    pub cleared_lines: ClearedRows,
    /// Points this move added to the score
    pub score_delta: u32,
    /// The session transitioned to game over during this move
    pub game_over: bool,
    pub message: &'static str,
}

impl MoveReport {
    fn rejected(message: &'static str) -> Self {
        Self {
            success: false,
            placed: false,
            cleared_lines: ClearedRows::new(),
            score_delta: 0,
            game_over: false,
            message,
        }
    }
}

/// The full persisted state of one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub board: Board,
    pub current: Piece,
    pub next: Piece,
    pub held: Option<Piece>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub status: GameStatus,
    start_level: u32,
    rng: PieceRng,
}

impl GameSession {
    /// Start a fresh game: empty board, two pieces drawn, hold available
    pub fn new(config: &GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = PieceRng::new(seed);
        let current = Piece::spawn(rng.piece(), config.width);
        let next = Piece::spawn(rng.piece(), config.width);
        Ok(Self {
            board: Board::new(config.width, config.height),
            current,
            next,
            held: None,
            can_hold: true,
            score: 0,
            level: config.start_level,
            lines_cleared: 0,
            status: GameStatus::Ongoing,
            start_level: config.start_level,
            rng,
        })
    }

    /// Apply one move to an ongoing session.
    ///
    /// Illegal moves come back as an unsuccessful report with the session
    /// untouched. Moves against a paused or finished session are the
    /// caller's mistake and return `NotOngoing` - the engine is only ever
    /// invoked on live sessions.
    pub fn apply_move(&mut self, kind: MoveKind, hold: HoldBehavior) -> Result<MoveReport> {
        if self.status != GameStatus::Ongoing {
            return Err(GameError::NotOngoing(self.status));
        }

        let outcome = process_move(
            self.board.clone(),
            self.current,
            kind,
            self.next,
            self.held,
            self.can_hold,
            hold,
            &mut self.rng,
        );

        if let Some(failure) = outcome.failure {
            return Ok(MoveReport::rejected(failure.message()));
        }

        self.board = outcome.board;
        self.current = outcome.current;
        self.next = outcome.next;
        self.held = outcome.held;
        self.can_hold = outcome.can_hold;

        let mut report = MoveReport {
            success: true,
            placed: outcome.placed,
            cleared_lines: ClearedRows::new(),
            score_delta: 0,
            game_over: false,
            message: outcome.message,
        };

        if outcome.placed {
            let cleared = self.board.clear_full_rows();
            // Score with the level the clear happened at, then re-level.
            let delta = line_clear_score(cleared.len(), self.level, kind);
            self.score += delta;
            self.lines_cleared += cleared.len() as u32;
            self.level = self.start_level.max(level_for_lines(self.lines_cleared));
            if !cleared.is_empty() {
                tracing::debug!(
                    cleared = cleared.len(),
                    score_delta = delta,
                    level = self.level,
                    "lines cleared"
                );
            }
            report.cleared_lines = cleared;
            report.score_delta = delta;
        }

        // A placement promotes the next piece; a hold swaps a new piece in.
        // Either way the incoming piece may already be blocked at spawn.
        if (outcome.placed || kind == MoveKind::Hold)
            && spawn_blocked(&self.board, &self.current)
        {
            self.status = GameStatus::GameOver;
            report.game_over = true;
            report.message = "game over";
            tracing::info!(score = self.score, lines = self.lines_cleared, "game over");
        }

        Ok(report)
    }

    /// Toggle between ongoing and paused. Finished games stay finished.
    pub fn set_paused(&mut self, paused: bool) -> Result<()> {
        if self.status == GameStatus::GameOver {
            return Err(GameError::AlreadyFinished);
        }
        self.status = if paused {
            GameStatus::Paused
        } else {
            GameStatus::Ongoing
        };
        Ok(())
    }

    /// End the game early at the player's request
    pub fn forfeit(&mut self) -> Result<()> {
        if self.status == GameStatus::GameOver {
            return Err(GameError::AlreadyFinished);
        }
        self.status = GameStatus::GameOver;
        Ok(())
    }

    /// Level the game started at
    pub fn start_level(&self) -> u32 {
        self.start_level
    }
}
