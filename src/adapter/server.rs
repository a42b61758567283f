//! TCP server for the game API
//!
//! Accepts connections, reads one JSON request per line, and writes one
//! JSON response per line. Each connection runs in its own task; all
//! per-session serialization happens in the service layer, so handlers
//! never coordinate with each other.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

use crate::adapter::protocol::{GameView, Request, Response};
use crate::core::HoldBehavior;
use crate::error::GameError;
use crate::service::GameService;

/// Listener configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("127.0.0.1"),
            port: 7878,
        }
    }
}

/// Bind and serve until the process is stopped
pub async fn run(config: &ServerConfig, service: Arc<GameService>) -> Result<()> {
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "listening");
    serve(listener, service).await
}

/// Serve an already-bound listener (lets tests bind an ephemeral port)
pub async fn serve(listener: TcpListener, service: Arc<GameService>) -> Result<()> {
    loop {
        let (stream, addr) = listener.accept().await?;
        tracing::debug!(%addr, "client connected");
        tokio::spawn(handle_client(stream, addr, service.clone()));
    }
}

async fn handle_client(stream: TcpStream, addr: SocketAddr, service: Arc<GameService>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::debug!(%addr, %err, "read failed");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = dispatch(&service, line).await;
        let mut payload = match serde_json::to_string(&response) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(%addr, %err, "response serialization failed");
                break;
            }
        };
        payload.push('\n');
        if writer.write_all(payload.as_bytes()).await.is_err() {
            break;
        }
    }

    tracing::debug!(%addr, "client disconnected");
}

/// Parse one request line and run it against the service
pub async fn dispatch(service: &GameService, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(err) => {
            return Response::Error {
                error: "bad_request",
                message: err.to_string(),
            }
        }
    };

    match request {
        Request::Create { config } => match service.create_game(config).await {
            Ok((game_id, session)) => Response::Created {
                game_id,
                width: session.board.width(),
                height: session.board.height(),
                level: session.level,
                message: "new game started",
            },
            Err(err) => error_response(err),
        },

        Request::Status { game_id } => match service.game_status(game_id).await {
            Ok(session) => Response::Game {
                game: GameView::new(game_id, &session),
            },
            Err(err) => error_response(err),
        },

        Request::Move {
            game_id,
            kind,
            clear_hold,
            skip_store,
        } => {
            let hold = HoldBehavior {
                clear_hold,
                skip_store,
            };
            match service.make_move(game_id, kind, hold).await {
                Ok((session, report)) => Response::Moved {
                    success: report.success,
                    message: report.message,
                    placed: report.placed,
                    cleared_lines: report.cleared_lines.to_vec(),
                    score_delta: report.score_delta,
                    game: GameView::new(game_id, &session),
                },
                Err(err) => error_response(err),
            }
        }

        Request::Pause { game_id, paused } => match service.set_paused(game_id, paused).await {
            Ok(session) => Response::Paused {
                game_id,
                status: session.status,
                message: if paused { "game paused" } else { "game resumed" },
            },
            Err(err) => error_response(err),
        },

        Request::Forfeit { game_id } => match service.forfeit(game_id).await {
            Ok(summary) => Response::Finished { summary },
            Err(err) => error_response(err),
        },

        Request::Leaderboard { limit } => Response::Leaderboard {
            scores: service.leaderboard(limit).await,
        },
    }
}

fn error_response(err: GameError) -> Response {
    Response::Error {
        error: err.code(),
        message: err.to_string(),
    }
}
