//! Tetris game service
//!
//! A move-processing engine for server-hosted Tetris games, plus the session
//! layer that persists per-game state between moves and the JSON-over-TCP
//! adapter that exposes it. The engine is pure and synchronous: every call
//! takes a full state snapshot and returns the next one, so the surrounding
//! service only has to serialize moves per game session.

pub mod adapter;
pub mod core;
pub mod error;
pub mod service;
pub mod session;
pub mod types;
