//! RawQuestion → Question: entity decoding plus a freshly shuffled answer set.

use std::collections::HashSet;

use rand::Rng;

use crate::domain::{Question, RawQuestion};
use crate::entities::decode_entities;
use crate::error::QuizError;
use crate::shuffle::shuffled;

/// Normalize with the thread-local generator.
pub fn normalize(raw: &RawQuestion) -> Result<Question, QuizError> {
  normalize_with(raw, &mut rand::thread_rng())
}

pub fn normalize_with<R: Rng + ?Sized>(raw: &RawQuestion, rng: &mut R) -> Result<Question, QuizError> {
  let text = decode_entities(&raw.question);
  let correct_answer = decode_entities(&raw.correct_answer);

  if text.trim().is_empty() {
    return Err(QuizError::MalformedQuestion("question text is empty".into()));
  }
  if correct_answer.trim().is_empty() {
    return Err(QuizError::MalformedQuestion(format!("'{text}' has no correct answer")));
  }
  if raw.incorrect_answers.is_empty() {
    return Err(QuizError::MalformedQuestion(format!("'{text}' has no incorrect answers")));
  }

  let mut answers: Vec<String> = raw.incorrect_answers.iter().map(|a| decode_entities(a)).collect();
  if answers.iter().any(|a| *a == correct_answer) {
    return Err(QuizError::MalformedQuestion(format!("'{text}' lists its correct answer as incorrect")));
  }
  let distinct: HashSet<&str> = answers.iter().map(String::as_str).collect();
  if distinct.len() != answers.len() {
    return Err(QuizError::MalformedQuestion(format!("'{text}' repeats an incorrect answer")));
  }
  answers.push(correct_answer.clone());

  Ok(Question {
    text,
    correct_answer,
    answers: shuffled(answers, rng),
    category: raw.category.as_deref().map(decode_entities),
    difficulty: raw.difficulty.clone(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::{rngs::StdRng, SeedableRng};

  fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
  }

  #[test]
  fn decodes_and_keeps_every_answer() {
    let raw = RawQuestion::new(
      "Which film is &quot;Rosebud&quot; from?",
      "Citizen Kane",
      &["Casablanca", "Vertigo", "Singin&#039; in the Rain"],
    );
    let q = normalize_with(&raw, &mut StdRng::seed_from_u64(3)).unwrap();

    assert_eq!(q.text, "Which film is \"Rosebud\" from?");
    assert_eq!(q.answers.len(), 4);
    assert_eq!(
      sorted(q.answers.clone()),
      sorted(vec![
        "Casablanca".into(),
        "Vertigo".into(),
        "Singin' in the Rain".into(),
        "Citizen Kane".into(),
      ])
    );
    assert_eq!(q.answers.iter().filter(|a| **a == q.correct_answer).count(), 1);
  }

  #[test]
  fn correct_answer_is_decoded_consistently() {
    let raw = RawQuestion::new("Q", "Tom &amp; Jerry", &["A", "B", "C"]);
    let q = normalize(&raw).unwrap();
    assert_eq!(q.correct_answer, "Tom & Jerry");
    assert!(q.has_answer("Tom & Jerry"));
  }

  #[test]
  fn rejects_missing_answers() {
    let no_correct = RawQuestion::new("Q", "  ", &["A"]);
    assert!(matches!(normalize(&no_correct), Err(QuizError::MalformedQuestion(_))));

    let no_incorrect = RawQuestion::new("Q", "A", &[]);
    assert!(matches!(normalize(&no_incorrect), Err(QuizError::MalformedQuestion(_))));

    let no_text = RawQuestion::new("", "A", &["B"]);
    assert!(matches!(normalize(&no_text), Err(QuizError::MalformedQuestion(_))));
  }

  #[test]
  fn correct_answer_must_appear_exactly_once() {
    // Equal only after decoding.
    let raw = RawQuestion::new("Q", "Tom &amp; Jerry", &["Tom & Jerry", "B", "C"]);
    assert!(matches!(normalize(&raw), Err(QuizError::MalformedQuestion(_))));

    let raw = RawQuestion::new("Q", "A", &["A", "B"]);
    assert!(matches!(normalize(&raw), Err(QuizError::MalformedQuestion(_))));
  }

  #[test]
  fn repeated_incorrect_answers_are_rejected() {
    let raw = RawQuestion::new("Q", "A", &["B", "B&#039;", "B"]);
    assert!(matches!(normalize(&raw), Err(QuizError::MalformedQuestion(_))));
  }

  #[test]
  fn answer_order_varies_between_normalizations() {
    let raw = RawQuestion::new("Q", "D", &["A", "B", "C"]);
    let mut rng = StdRng::seed_from_u64(11);
    let first = normalize_with(&raw, &mut rng).unwrap().answers;
    let varied = (0..30).any(|_| normalize_with(&raw, &mut rng).unwrap().answers != first);
    assert!(varied);
  }
}
