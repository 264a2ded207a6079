//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! Behavior:
//! - LOG_LEVEL controls the filter (e.g. "debug" or detailed directives like
//!   "info,quiz=debug,trivia_quiz=debug,tower_http=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Targets: `trivia_quiz` for process/transport events, `quiz` for session and
//! question source events.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,quiz=debug,trivia_quiz=debug,tower_http=info,axum=info";

fn env_filter() -> EnvFilter {
    match EnvFilter::try_from_env("LOG_LEVEL") {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    }
}

pub fn init_tracing() {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // JSON and pretty are different subscriber types; init each branch separately.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
