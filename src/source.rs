//! Question source: remote bank first, fixed fallback set on any failure.
//!
//! `fetch` is total. Failures are logged and collapsed into a fallback batch
//! with an informational notice; callers never see a source error.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::bank::QuestionBank;
use crate::domain::{Question, QuestionOrigin, QuizParameters, RawQuestion};
use crate::error::QuizError;
use crate::normalize::normalize;
use crate::seeds::{fallback_questions, FALLBACK_NOTICE};

/// A batch ready to install into a session. `questions` is never empty.
#[derive(Clone, Debug)]
pub struct FetchOutcome {
  pub questions: Vec<Question>,
  pub origin: QuestionOrigin,
  pub notice: Option<String>,
}

#[derive(Clone)]
pub struct QuestionSource {
  bank: Option<Arc<dyn QuestionBank>>,
}

impl QuestionSource {
  pub fn new(bank: Option<Arc<dyn QuestionBank>>) -> Self {
    Self { bank }
  }

  /// A source with no remote bank; always serves the fallback set.
  pub fn offline() -> Self {
    Self { bank: None }
  }

  pub fn has_bank(&self) -> bool {
    self.bank.is_some()
  }

  #[instrument(level = "info", skip(self), fields(amount = params.amount(), category = params.category().name()))]
  pub async fn fetch(&self, params: &QuizParameters) -> FetchOutcome {
    let Some(bank) = &self.bank else {
      warn!(target: "quiz", "No question bank configured; serving fallback set");
      return fallback();
    };

    match try_fetch(bank.as_ref(), params).await {
      Ok(questions) => {
        info!(target: "quiz", count = questions.len(), "Serving remote questions");
        FetchOutcome { questions, origin: QuestionOrigin::Remote, notice: None }
      }
      Err(e) => {
        error!(target: "quiz", error = %e, "Question fetch failed; using fallback set");
        fallback()
      }
    }
  }
}

async fn try_fetch(bank: &dyn QuestionBank, params: &QuizParameters) -> Result<Vec<Question>, QuizError> {
  let raws = bank.fetch_raw(params).await?;
  if raws.is_empty() {
    return Err(QuizError::MalformedResponse("no results".into()));
  }
  normalize_all(&raws, params.amount() as usize)
}

fn normalize_all(raws: &[RawQuestion], limit: usize) -> Result<Vec<Question>, QuizError> {
  raws.iter().take(limit).map(normalize).collect()
}

fn fallback() -> FetchOutcome {
  let questions = fallback_questions()
    .iter()
    .filter_map(|raw| normalize(raw).ok())
    .collect();
  FetchOutcome {
    questions,
    origin: QuestionOrigin::Fallback,
    notice: Some(FALLBACK_NOTICE.to_string()),
  }
}
