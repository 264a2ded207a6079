//! Remote question bank client (Open Trivia DB).
//!
//! One GET per call, no retries. Calls are instrumented and log the request
//! parameters, latency and result counts (never full bodies).

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::config::BankConfig;
use crate::domain::{QuizParameters, RawQuestion};
use crate::error::QuizError;
use crate::util::trunc_for_log;

/// Fetch capability used by the question source. Implementations return the
/// bank's records as-is; normalization happens in the source.
#[async_trait]
pub trait QuestionBank: Send + Sync {
  async fn fetch_raw(&self, params: &QuizParameters) -> Result<Vec<RawQuestion>, QuizError>;
}

#[derive(Clone, Debug)]
pub struct OpenTriviaDb {
  pub client: reqwest::Client,
  pub base_url: String,
}

#[derive(Deserialize)]
struct BankResponse {
  #[serde(default)]
  response_code: Option<i64>,
  #[serde(default)]
  results: Option<Vec<RawQuestion>>,
}

/// Query string pairs for a request. `category` and `difficulty` are left
/// out when they are "any".
pub fn query_pairs(params: &QuizParameters) -> Vec<(&'static str, String)> {
  let mut q = vec![("amount", params.amount().to_string())];
  if let Some(id) = params.category().id() {
    q.push(("category", id.to_string()));
  }
  if let Some(d) = params.difficulty().as_query() {
    q.push(("difficulty", d.to_string()));
  }
  q.push(("type", "multiple".to_string()));
  q
}

impl OpenTriviaDb {
  /// Build the client from config; `None` when the bank is disabled or the
  /// HTTP client can't be constructed.
  pub fn from_config(cfg: &BankConfig) -> Option<Self> {
    if !cfg.enabled {
      return None;
    }
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(cfg.timeout_secs))
      .build()
      .ok()?;
    Some(Self { client, base_url: cfg.base_url.clone() })
  }

  fn parse_body(body: &str) -> Result<Vec<RawQuestion>, QuizError> {
    let parsed: BankResponse = serde_json::from_str(body)
      .map_err(|e| QuizError::MalformedResponse(format!("JSON parse error: {e}")))?;
    match parsed.response_code {
      None | Some(0) => {}
      Some(code) => {
        return Err(QuizError::MalformedResponse(format!("bank response_code {code}")));
      }
    }
    match parsed.results {
      Some(results) if !results.is_empty() => Ok(results),
      _ => Err(QuizError::MalformedResponse("no results".into())),
    }
  }
}

#[async_trait]
impl QuestionBank for OpenTriviaDb {
  #[instrument(level = "info", skip(self))]
  async fn fetch_raw(&self, params: &QuizParameters) -> Result<Vec<RawQuestion>, QuizError> {
    let start = Instant::now();
    debug!(target: "quiz", base_url = %self.base_url, "Requesting questions");
    let res = self
      .client
      .get(&self.base_url)
      .header(USER_AGENT, "trivia-quiz/0.1")
      .query(&query_pairs(params))
      .send()
      .await?;

    let status = res.status();
    if !status.is_success() {
      let body = res.text().await.unwrap_or_default();
      debug!(target: "quiz", %status, body = %trunc_for_log(&body, 200), "Question bank error body");
      return Err(QuizError::HttpStatus(status.as_u16()));
    }

    let body = res.text().await?;
    let results = Self::parse_body(&body)?;
    info!(target: "quiz", elapsed = ?start.elapsed(), count = results.len(), "Question bank responded");
    Ok(results)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::category::Category;
  use crate::domain::Difficulty;
  use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
  use std::collections::HashMap;

  fn params(amount: u32, category: Category, difficulty: Difficulty) -> QuizParameters {
    QuizParameters::new(amount, category, difficulty).unwrap()
  }

  async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api.php")
  }

  fn bank(base_url: String) -> OpenTriviaDb {
    OpenTriviaDb::from_config(&BankConfig { enabled: true, base_url, timeout_secs: 5 }).unwrap()
  }

  #[test]
  fn query_omits_any_filters() {
    let q = query_pairs(&params(5, Category::Any, Difficulty::Any));
    assert_eq!(q, vec![("amount", "5".to_string()), ("type", "multiple".to_string())]);

    let q = query_pairs(&params(3, Category::from_id(22).unwrap(), Difficulty::Hard));
    assert_eq!(
      q,
      vec![
        ("amount", "3".to_string()),
        ("category", "22".to_string()),
        ("difficulty", "hard".to_string()),
        ("type", "multiple".to_string()),
      ]
    );
  }

  #[test]
  fn body_without_results_is_malformed() {
    assert!(matches!(
      OpenTriviaDb::parse_body(r#"{"response_code":0,"results":[]}"#),
      Err(QuizError::MalformedResponse(_))
    ));
    assert!(matches!(
      OpenTriviaDb::parse_body(r#"{"response_code":1,"results":[]}"#),
      Err(QuizError::MalformedResponse(_))
    ));
    assert!(matches!(OpenTriviaDb::parse_body("<html>"), Err(QuizError::MalformedResponse(_))));
  }

  #[test]
  fn disabled_bank_builds_no_client() {
    let cfg = BankConfig { enabled: false, ..BankConfig::default() };
    assert!(OpenTriviaDb::from_config(&cfg).is_none());
  }

  #[tokio::test]
  async fn fetches_and_forwards_query() {
    let router = Router::new().route(
      "/api.php",
      get(|Query(q): Query<HashMap<String, String>>| async move {
        assert_eq!(q.get("type").map(String::as_str), Some("multiple"));
        assert_eq!(q.get("category").map(String::as_str), Some("9"));
        assert!(!q.contains_key("difficulty"));
        Json(serde_json::json!({
          "response_code": 0,
          "results": [{
            "question": "Who&#039;s on first?",
            "correct_answer": "Who",
            "incorrect_answers": ["What", "I Don&#039;t Know"]
          }]
        }))
      }),
    );
    let url = serve(router).await;

    let raws = bank(url)
      .fetch_raw(&params(1, Category::from_id(9).unwrap(), Difficulty::Any))
      .await
      .unwrap();
    assert_eq!(raws.len(), 1);
    assert_eq!(raws[0].question, "Who&#039;s on first?");
  }

  #[tokio::test]
  async fn non_success_status_is_reported() {
    let router = Router::new().route("/api.php", get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }));
    let url = serve(router).await;

    let err = bank(url)
      .fetch_raw(&params(5, Category::Any, Difficulty::Any))
      .await
      .unwrap_err();
    assert_eq!(err, QuizError::HttpStatus(429));
  }

  #[tokio::test]
  async fn unreachable_bank_is_a_transport_failure() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = bank(format!("http://{addr}/api.php"))
      .fetch_raw(&params(5, Category::Any, Difficulty::Any))
      .await
      .unwrap_err();
    assert!(matches!(err, QuizError::TransportFailure(_)));
  }
}
