//! Adapter module - the JSON-over-TCP wrapper around the game service
//!
//! Transport only: message shapes and the connection loop. All game rules
//! live in `core`, all state handling in `session`/`service`.

pub mod protocol;
pub mod server;

pub use protocol::{GameView, Request, Response};
pub use server::{dispatch, serve, ServerConfig};
