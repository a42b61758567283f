//! Service module - the in-memory session store and game operations
//!
//! The store keeps one async mutex per game entry so moves against the same
//! session are applied strictly one at a time, while different sessions
//! proceed in parallel. Finished games (detected game over or forfeit)
//! contribute a record to the high-score table served by the leaderboard
//! query.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tokio::sync::{Mutex, RwLock};

use crate::core::HoldBehavior;
use crate::error::{GameError, Result};
use crate::session::{GameConfig, GameSession, MoveReport};
use crate::types::{GameId, MoveKind};

/// One finished game's contribution to the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighScore {
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    pub duration_secs: u64,
}

/// Final accounting of a finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    pub game_id: GameId,
    pub final_score: u32,
    pub level_reached: u32,
    pub lines_cleared: u32,
    pub duration_secs: u64,
    /// This score topped every previously recorded one
    pub high_score: bool,
}

struct GameEntry {
    session: GameSession,
    created_at: Instant,
}

/// In-memory session store plus the operations exposed over the adapter
#[derive(Default)]
pub struct GameService {
    games: RwLock<HashMap<GameId, Arc<Mutex<GameEntry>>>>,
    next_id: AtomicU64,
    high_scores: RwLock<Vec<HighScore>>,
}

impl GameService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and store a new game, returning its id and initial state
    pub async fn create_game(&self, config: GameConfig) -> Result<(GameId, GameSession)> {
        let session = GameSession::new(&config, rand::random())?;
        let game_id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let entry = GameEntry {
            session: session.clone(),
            created_at: Instant::now(),
        };
        self.games
            .write()
            .await
            .insert(game_id, Arc::new(Mutex::new(entry)));
        tracing::info!(
            game_id,
            width = config.width,
            height = config.height,
            start_level = config.start_level,
            "game created"
        );
        Ok((game_id, session))
    }

    /// Current state of a game
    pub async fn game_status(&self, game_id: GameId) -> Result<GameSession> {
        let entry = self.entry(game_id).await?;
        let entry = entry.lock().await;
        Ok(entry.session.clone())
    }

    /// Apply one move under the game's entry lock and persist the result.
    /// Ends the game (and records the score) when the move detected game
    /// over.
    pub async fn make_move(
        &self,
        game_id: GameId,
        kind: MoveKind,
        hold: HoldBehavior,
    ) -> Result<(GameSession, MoveReport)> {
        let entry = self.entry(game_id).await?;
        let mut entry = entry.lock().await;
        let report = entry.session.apply_move(kind, hold)?;
        tracing::debug!(
            game_id,
            kind = kind.as_str(),
            success = report.success,
            placed = report.placed,
            "move applied"
        );
        if report.game_over {
            let duration_secs = entry.created_at.elapsed().as_secs();
            self.record_high_score(&entry.session, duration_secs).await;
        }
        Ok((entry.session.clone(), report))
    }

    /// Pause or resume a live game
    pub async fn set_paused(&self, game_id: GameId, paused: bool) -> Result<GameSession> {
        let entry = self.entry(game_id).await?;
        let mut entry = entry.lock().await;
        entry.session.set_paused(paused)?;
        Ok(entry.session.clone())
    }

    /// Forfeit a live game, recording its score like a detected game over
    pub async fn forfeit(&self, game_id: GameId) -> Result<GameSummary> {
        let entry = self.entry(game_id).await?;
        let mut entry = entry.lock().await;
        entry.session.forfeit()?;
        let duration_secs = entry.created_at.elapsed().as_secs();
        let high_score = self.record_high_score(&entry.session, duration_secs).await;
        tracing::info!(game_id, score = entry.session.score, "game forfeited");
        Ok(GameSummary {
            game_id,
            final_score: entry.session.score,
            level_reached: entry.session.level,
            lines_cleared: entry.session.lines_cleared,
            duration_secs,
            high_score,
        })
    }

    /// Best recorded scores, descending, truncated to `limit`
    pub async fn leaderboard(&self, limit: usize) -> Vec<HighScore> {
        let scores = self.high_scores.read().await;
        let mut sorted: Vec<HighScore> = scores.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(limit);
        sorted
    }

    async fn entry(&self, game_id: GameId) -> Result<Arc<Mutex<GameEntry>>> {
        self.games
            .read()
            .await
            .get(&game_id)
            .cloned()
            .ok_or(GameError::NotFound(game_id))
    }

    /// Record a finished game. Returns true when the score topped every
    /// previously recorded one.
    async fn record_high_score(&self, session: &GameSession, duration_secs: u64) -> bool {
        let mut scores = self.high_scores.write().await;
        let best = scores.iter().map(|s| s.score).max().unwrap_or(0);
        scores.push(HighScore {
            score: session.score,
            level: session.level,
            lines_cleared: session.lines_cleared,
            duration_secs,
        });
        session.score > best
    }
}
