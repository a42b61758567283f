//! Game server entrypoint
//!
//! Binds the TCP listener and serves the JSON line protocol. Listener
//! address comes from `--host`/`--port`; log filtering from `RUST_LOG`.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

use tetris_service::adapter::server::{run, ServerConfig};
use tetris_service::service::GameService;

fn parse_args(args: &[String]) -> Result<ServerConfig> {
    let mut config = ServerConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--host" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --host"))?;
                config.host = v.clone();
            }
            "--port" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --port"))?;
                config.port = v
                    .parse::<u16>()
                    .map_err(|_| anyhow!("invalid --port value: {}", v))?;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    let service = Arc::new(GameService::new());
    run(&config, service).await
}
