//! Built-in fallback questions. They keep the quiz playable when the remote
//! bank cannot be reached.

use crate::domain::RawQuestion;

pub const FALLBACK_NOTICE: &str = "Failed to fetch questions. Using sample questions.";

/// The fixed three-question fallback set, unshuffled.
pub fn fallback_questions() -> Vec<RawQuestion> {
  vec![
    RawQuestion::new(
      "What is the capital of France?",
      "Paris",
      &["Berlin", "Madrid", "Rome"],
    ),
    RawQuestion::new(
      "Which planet is known as the Red Planet?",
      "Mars",
      &["Earth", "Jupiter", "Venus"],
    ),
    RawQuestion::new(
      "Who wrote 'To Kill a Mockingbird'?",
      "Harper Lee",
      &["Mark Twain", "J.K. Rowling", "Ernest Hemingway"],
    ),
  ]
}
