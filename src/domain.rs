//! Domain models: quiz parameters, raw and normalized questions, session phases.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::QuizError;

pub const MIN_AMOUNT: u32 = 1;
pub const MAX_AMOUNT: u32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  #[default]
  Any,
  Easy,
  Medium,
  Hard,
}

impl Difficulty {
  pub fn from_name(name: &str) -> Option<Self> {
    match name.trim().to_ascii_lowercase().as_str() {
      "" | "any" => Some(Difficulty::Any),
      "easy" => Some(Difficulty::Easy),
      "medium" => Some(Difficulty::Medium),
      "hard" => Some(Difficulty::Hard),
      _ => None,
    }
  }

  /// Query value for the bank; `None` for `Any`.
  pub fn as_query(&self) -> Option<&'static str> {
    match self {
      Difficulty::Any => None,
      Difficulty::Easy => Some("easy"),
      Difficulty::Medium => Some("medium"),
      Difficulty::Hard => Some("hard"),
    }
  }
}

/// User choices for one quiz attempt. Validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct QuizParameters {
  amount: u32,
  category: Category,
  difficulty: Difficulty,
}

impl QuizParameters {
  pub fn new(amount: u32, category: Category, difficulty: Difficulty) -> Result<Self, QuizError> {
    if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&amount) {
      return Err(QuizError::InvalidParameters(format!(
        "amount must be between {MIN_AMOUNT} and {MAX_AMOUNT}, got {amount}"
      )));
    }
    Ok(Self { amount, category, difficulty })
  }

  /// Build from loosely typed input (names as sent by a client).
  pub fn parse(amount: u32, category: &str, difficulty: &str) -> Result<Self, QuizError> {
    let category = Category::from_name(category)
      .ok_or_else(|| QuizError::InvalidParameters(format!("unknown category '{category}'")))?;
    let difficulty = Difficulty::from_name(difficulty)
      .ok_or_else(|| QuizError::InvalidParameters(format!("unknown difficulty '{difficulty}'")))?;
    Self::new(amount, category, difficulty)
  }

  pub fn amount(&self) -> u32 { self.amount }
  pub fn category(&self) -> Category { self.category }
  pub fn difficulty(&self) -> Difficulty { self.difficulty }
}

/// A question as delivered by the bank (entity-encoded text).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RawQuestion {
  #[serde(default)] pub question: String,
  #[serde(default)] pub correct_answer: String,
  #[serde(default)] pub incorrect_answers: Vec<String>,
  #[serde(default)] pub category: Option<String>,
  #[serde(default)] pub difficulty: Option<String>,
}

impl RawQuestion {
  pub fn new(question: &str, correct_answer: &str, incorrect_answers: &[&str]) -> Self {
    Self {
      question: question.into(),
      correct_answer: correct_answer.into(),
      incorrect_answers: incorrect_answers.iter().map(|s| (*s).to_string()).collect(),
      category: None,
      difficulty: None,
    }
  }
}

/// A display-ready question. `answers` holds the correct answer exactly once.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Question {
  pub text: String,
  pub correct_answer: String,
  pub answers: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub difficulty: Option<String>,
}

impl Question {
  pub fn has_answer(&self, choice: &str) -> bool {
    self.answers.iter().any(|a| a == choice)
  }
}

/// Where a batch of questions came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionOrigin {
  Remote,
  Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
  #[default]
  Setup,
  Loading,
  Active,
  Results,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Phase::Setup => "setup",
      Phase::Loading => "loading",
      Phase::Active => "active",
      Phase::Results => "results",
    };
    f.write_str(s)
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
  Correct,
  Incorrect,
}

impl Feedback {
  pub fn message(&self) -> &'static str {
    match self {
      Feedback::Correct => "Correct!",
      Feedback::Incorrect => "Wrong!",
    }
  }
}

/// One scored selection, kept for the results review.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnswerRecord {
  pub question: String,
  pub chosen: String,
  pub correct_answer: String,
  pub correct: bool,
}
