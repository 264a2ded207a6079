//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! Each function turns a wire request into a controller call and returns the
//! resulting session snapshot. Caller errors come back as `QuizError`.

use tracing::{info, instrument};

use crate::domain::Feedback;
use crate::error::QuizError;
use crate::protocol::StartIn;
use crate::session::SessionView;
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn start_quiz(state: &AppState, req: StartIn) -> Result<SessionView, QuizError> {
  let params = state.config.parameters(req.amount, req.category.as_deref(), req.difficulty.as_deref())?;
  let view = state.start(params).await?;
  info!(target: "quiz", phase = %view.phase, total = view.total_questions, origin = ?view.origin, "Start handled");
  Ok(view)
}

#[instrument(level = "info", skip(state, choice), fields(choice_len = choice.len()))]
pub async fn submit_answer(state: &AppState, choice: &str) -> Result<(Feedback, SessionView), QuizError> {
  let (feedback, view) = state.answer(choice).await?;
  info!(target: "quiz", question = view.question_number, ?feedback, score = view.score, "Answer handled");
  Ok((feedback, view))
}

#[instrument(level = "info", skip(state))]
pub async fn next_question(state: &AppState) -> Result<SessionView, QuizError> {
  state.next().await
}

#[instrument(level = "info", skip(state))]
pub async fn reset_quiz(state: &AppState) -> Result<SessionView, QuizError> {
  state.reset().await
}
