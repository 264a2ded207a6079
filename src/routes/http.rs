//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Caller mistakes map to 4xx: bad parameters → 400, out-of-order operations → 409.

use std::sync::Arc;
use axum::{body::Bytes, extract::State, http::StatusCode, response::{IntoResponse, Response}, Json};
use tracing::{instrument, warn};

use crate::error::QuizError;
use crate::logic::*;
use crate::protocol::*;
use crate::session::SessionView;
use crate::state::AppState;

impl IntoResponse for QuizError {
  fn into_response(self) -> Response {
    let status = match &self {
      QuizError::InvalidParameters(_) => StatusCode::BAD_REQUEST,
      QuizError::InvalidTransition { .. } | QuizError::UnknownAnswer(_) => StatusCode::CONFLICT,
      e if e.is_recoverable() => StatusCode::BAD_GATEWAY,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(target: "trivia_quiz", %status, error = %self, "HTTP request rejected");
    (status, Json(ErrorOut { error: self.to_string() })).into_response()
  }
}

#[instrument(level = "info", skip(state))]
pub async fn http_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthOut { ok: true, bank_enabled: state.source.has_bank() })
}

#[instrument(level = "info")]
pub async fn http_get_categories() -> impl IntoResponse {
  Json(categories_out())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
  Json(state.view().await)
}

/// An empty body starts with the configured defaults; anything else must be a
/// valid `StartIn`.
fn parse_start_body(body: &[u8]) -> Result<StartIn, QuizError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(StartIn::default());
  }
  serde_json::from_slice(body).map_err(|e| QuizError::InvalidParameters(format!("start request: {e}")))
}

#[instrument(level = "info", skip(state, body), fields(body_len = body.len()))]
pub async fn http_post_start(
  State(state): State<Arc<AppState>>,
  body: Bytes,
) -> Result<Json<SessionView>, QuizError> {
  let req = parse_start_body(&body)?;
  Ok(Json(start_quiz(&state, req).await?))
}

#[instrument(level = "info", skip(state, body), fields(choice_len = body.choice.len()))]
pub async fn http_post_answer(
  State(state): State<Arc<AppState>>,
  Json(body): Json<AnswerIn>,
) -> Result<Json<AnswerOut>, QuizError> {
  let (feedback, session) = submit_answer(&state, &body.choice).await?;
  Ok(Json(AnswerOut { feedback, message: feedback.message(), session }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_next(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, QuizError> {
  Ok(Json(next_question(&state).await?))
}

#[instrument(level = "info", skip(state))]
pub async fn http_post_reset(State(state): State<Arc<AppState>>) -> Result<Json<SessionView>, QuizError> {
  Ok(Json(reset_quiz(&state).await?))
}
