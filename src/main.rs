//! Trivia Quiz · Session Controller Backend
//!
//! - Axum HTTP + WebSocket API driving a single quiz session
//! - Questions from Open Trivia DB, with a built-in sample set when it is unreachable
//! - Static frontend fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   QUIZ_CONFIG_PATH    : path to TOML config (bank endpoint + default parameters)
//!   TRIVIA_API_URL      : question bank endpoint, default "https://opentdb.com/api.php"
//!   TRIVIA_TIMEOUT_SECS : bank request timeout (default 10)
//!   TRIVIA_BANK_ENABLED : "false" serves only the built-in questions
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod bank;
mod category;
mod config;
mod domain;
mod entities;
mod error;
mod logic;
mod normalize;
mod protocol;
mod routes;
mod seeds;
mod session;
mod shuffle;
mod source;
mod state;
mod telemetry;
mod util;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state);

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "trivia_quiz", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "trivia_quiz", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "trivia_quiz", error = %e, "Failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
  info!(target: "trivia_quiz", "Shutdown signal received");
}
