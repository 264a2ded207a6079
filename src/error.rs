//! Error taxonomy for the quiz backend.
//!
//! Transport, response and question errors are absorbed by the question source
//! (fallback set). Transition and answer errors are caller bugs and always
//! reach the caller.

use thiserror::Error;

use crate::domain::Phase;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizError {
  #[error("question bank unreachable: {0}")]
  TransportFailure(String),
  #[error("question bank returned HTTP {0}")]
  HttpStatus(u16),
  #[error("malformed question bank response: {0}")]
  MalformedResponse(String),
  #[error("malformed question: {0}")]
  MalformedQuestion(String),
  #[error("`{operation}` is not allowed while the quiz is in phase {phase}")]
  InvalidTransition { operation: &'static str, phase: Phase },
  #[error("'{0}' is not one of the current question's answers")]
  UnknownAnswer(String),
  #[error("invalid quiz parameters: {0}")]
  InvalidParameters(String),
  #[error("internal error: {0}")]
  Internal(String),
}

impl QuizError {
  /// True for errors the question source recovers from with the fallback set.
  pub fn is_recoverable(&self) -> bool {
    matches!(
      self,
      QuizError::TransportFailure(_)
        | QuizError::HttpStatus(_)
        | QuizError::MalformedResponse(_)
        | QuizError::MalformedQuestion(_)
    )
  }
}

impl From<reqwest::Error> for QuizError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() {
      QuizError::MalformedResponse(e.to_string())
    } else if let Some(status) = e.status() {
      QuizError::HttpStatus(status.as_u16())
    } else {
      QuizError::TransportFailure(e.to_string())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_source_errors_are_recoverable() {
    assert!(QuizError::HttpStatus(503).is_recoverable());
    assert!(QuizError::MalformedQuestion("empty".into()).is_recoverable());
    assert!(!QuizError::UnknownAnswer("x".into()).is_recoverable());
    assert!(!QuizError::InvalidTransition { operation: "next", phase: Phase::Setup }.is_recoverable());
    assert!(!QuizError::Internal("task panicked".into()).is_recoverable());
  }

  #[test]
  fn transition_error_names_operation_and_phase() {
    let e = QuizError::InvalidTransition { operation: "answer", phase: Phase::Results };
    assert_eq!(e.to_string(), "`answer` is not allowed while the quiz is in phase results");
  }
}
