//! Quiz session state machine.
//!
//! Setup → Loading → Active → Results → Setup. Every mutation goes through
//! one of the transition methods below; anything else is rejected with
//! `QuizError::InvalidTransition` and leaves the session untouched.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{AnswerRecord, Feedback, Phase, Question, QuestionOrigin, QuizParameters};
use crate::error::QuizError;
use crate::source::FetchOutcome;

#[derive(Debug, Default)]
pub struct QuizSession {
  attempt: Option<Uuid>,
  parameters: Option<QuizParameters>,
  questions: Vec<Question>,
  current_index: usize,
  score: usize,
  selected_answer: Option<String>,
  feedback: Option<Feedback>,
  origin: Option<QuestionOrigin>,
  notice: Option<String>,
  log: Vec<AnswerRecord>,
  phase: Phase,
}

/// Read-only snapshot handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionView {
  pub phase: Phase,
  pub parameters: Option<QuizParameters>,
  pub question_number: usize,
  pub total_questions: usize,
  pub question: Option<String>,
  pub answers: Vec<String>,
  pub progress: f64,
  pub score: usize,
  pub selected_answer: Option<String>,
  /// Only revealed once the current question has been answered.
  pub correct_answer: Option<String>,
  pub feedback: Option<Feedback>,
  pub feedback_message: Option<&'static str>,
  pub origin: Option<QuestionOrigin>,
  pub notice: Option<String>,
  pub review: Vec<AnswerRecord>,
}

impl QuizSession {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn questions(&self) -> &[Question] { &self.questions }

  /// The question being asked; `None` outside `Active`.
  pub fn current_question(&self) -> Option<&Question> {
    match self.phase {
      Phase::Active => self.questions.get(self.current_index),
      _ => None,
    }
  }

  pub fn progress(&self) -> f64 {
    match self.phase {
      Phase::Active if !self.questions.is_empty() => {
        (self.current_index + 1) as f64 / self.questions.len() as f64
      }
      Phase::Results => 1.0,
      _ => 0.0,
    }
  }

  fn reject(&self, operation: &'static str) -> QuizError {
    warn!(target: "quiz", operation, phase = %self.phase, "Rejected transition");
    QuizError::InvalidTransition { operation, phase: self.phase }
  }

  /// Setup → Loading. Returns the attempt id the fetched batch must carry.
  pub fn begin(&mut self, parameters: QuizParameters) -> Result<Uuid, QuizError> {
    if self.phase != Phase::Setup {
      return Err(self.reject("start"));
    }
    let attempt = Uuid::new_v4();
    self.attempt = Some(attempt);
    self.parameters = Some(parameters);
    self.phase = Phase::Loading;
    info!(target: "quiz", %attempt, amount = parameters.amount(), "Quiz loading");
    Ok(attempt)
  }

  /// Loading → Active. Returns false (and changes nothing) when `attempt`
  /// is no longer the live one, i.e. the session was reset while loading.
  pub fn install(&mut self, attempt: Uuid, outcome: FetchOutcome) -> bool {
    if self.phase != Phase::Loading || self.attempt != Some(attempt) {
      warn!(target: "quiz", %attempt, phase = %self.phase, "Discarding stale question batch");
      return false;
    }
    if outcome.questions.is_empty() {
      // Sources always deliver at least the fallback set; treat an empty
      // batch as a cancelled load.
      warn!(target: "quiz", %attempt, "Empty question batch; returning to setup");
      *self = Self::default();
      return false;
    }

    self.questions = outcome.questions;
    self.origin = Some(outcome.origin);
    self.notice = outcome.notice;
    self.current_index = 0;
    self.score = 0;
    self.selected_answer = None;
    self.feedback = None;
    self.log.clear();
    self.phase = Phase::Active;
    info!(target: "quiz", %attempt, count = self.questions.len(), origin = ?outcome.origin, "Quiz active");
    true
  }

  /// Loading → Setup for a load that will never install. No-op unless
  /// `attempt` is still the live one.
  pub fn abandon(&mut self, attempt: Uuid) {
    if self.phase == Phase::Loading && self.attempt == Some(attempt) {
      warn!(target: "quiz", %attempt, "Abandoning quiz load");
      *self = Self::default();
    }
  }

  /// Record the selection for the current question. Only the first
  /// selection counts; repeats return the original feedback unchanged.
  pub fn answer(&mut self, choice: &str) -> Result<Feedback, QuizError> {
    if self.phase != Phase::Active {
      return Err(self.reject("answer"));
    }
    if let Some(feedback) = self.feedback {
      debug!(target: "quiz", index = self.current_index, "Question already answered; ignoring");
      return Ok(feedback);
    }

    let question = &self.questions[self.current_index];
    if !question.has_answer(choice) {
      return Err(QuizError::UnknownAnswer(choice.to_string()));
    }

    let correct = choice == question.correct_answer;
    let feedback = if correct { Feedback::Correct } else { Feedback::Incorrect };
    self.log.push(AnswerRecord {
      question: question.text.clone(),
      chosen: choice.to_string(),
      correct_answer: question.correct_answer.clone(),
      correct,
    });
    if correct {
      self.score += 1;
    }
    self.selected_answer = Some(choice.to_string());
    self.feedback = Some(feedback);
    debug!(target: "quiz", index = self.current_index, correct, score = self.score, "Answer recorded");
    Ok(feedback)
  }

  /// Advance to the next question, or to Results after the last one.
  pub fn next(&mut self) -> Result<Phase, QuizError> {
    if self.phase != Phase::Active || self.selected_answer.is_none() {
      return Err(self.reject("next"));
    }
    if self.current_index + 1 < self.questions.len() {
      self.current_index += 1;
      self.selected_answer = None;
      self.feedback = None;
    } else {
      self.phase = Phase::Results;
      info!(target: "quiz", score = self.score, total = self.questions.len(), "Quiz finished");
    }
    Ok(self.phase)
  }

  /// Results → Setup, or Loading → Setup (cancels the pending fetch).
  pub fn reset(&mut self) -> Result<(), QuizError> {
    match self.phase {
      Phase::Results | Phase::Loading => {
        if self.phase == Phase::Loading {
          info!(target: "quiz", attempt = ?self.attempt, "Cancelling quiz load");
        }
        *self = Self::default();
        Ok(())
      }
      _ => Err(self.reject("reset")),
    }
  }

  pub fn view(&self) -> SessionView {
    let question = self.current_question();
    let answered = self.selected_answer.is_some();
    SessionView {
      phase: self.phase,
      parameters: self.parameters,
      question_number: if question.is_some() { self.current_index + 1 } else { 0 },
      total_questions: self.questions.len(),
      question: question.map(|q| q.text.clone()),
      answers: question.map(|q| q.answers.clone()).unwrap_or_default(),
      progress: self.progress(),
      score: self.score,
      selected_answer: self.selected_answer.clone(),
      correct_answer: question.filter(|_| answered).map(|q| q.correct_answer.clone()),
      feedback: self.feedback,
      feedback_message: self.feedback.map(|f| f.message()),
      origin: self.origin,
      notice: self.notice.clone(),
      review: if self.phase == Phase::Results { self.log.clone() } else { Vec::new() },
    }
  }
}

#[cfg(test)]
impl QuizSession {
  pub fn phase(&self) -> Phase { self.phase }
  pub fn score(&self) -> usize { self.score }
  pub fn current_index(&self) -> usize { self.current_index }
  pub fn selected_answer(&self) -> Option<&str> { self.selected_answer.as_deref() }
  pub fn feedback(&self) -> Option<Feedback> { self.feedback }
  pub fn notice(&self) -> Option<&str> { self.notice.as_deref() }
  pub fn parameters(&self) -> Option<&QuizParameters> { self.parameters.as_ref() }
}
