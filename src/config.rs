//! Loading quiz configuration (question bank endpoint + default parameters) from TOML.
//!
//! See `QuizConfig` for the expected schema. Environment variables override the file:
//! `TRIVIA_API_URL`, `TRIVIA_TIMEOUT_SECS`, `TRIVIA_BANK_ENABLED`.

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::QuizParameters;
use crate::error::QuizError;

pub const DEFAULT_BANK_URL: &str = "https://opentdb.com/api.php";

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct QuizConfig {
  #[serde(default)]
  pub bank: BankConfig,
  #[serde(default)]
  pub defaults: DefaultParams,
}

/// Remote question bank settings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct BankConfig {
  pub enabled: bool,
  pub base_url: String,
  pub timeout_secs: u64,
}

impl Default for BankConfig {
  fn default() -> Self {
    Self { enabled: true, base_url: DEFAULT_BANK_URL.into(), timeout_secs: 10 }
  }
}

/// Values used when a start request leaves a field out.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DefaultParams {
  pub amount: u32,
  pub category: String,
  pub difficulty: String,
}

impl Default for DefaultParams {
  fn default() -> Self {
    Self { amount: 5, category: "any".into(), difficulty: "any".into() }
  }
}

impl QuizConfig {
  /// Merge optional client fields over the configured defaults.
  pub fn parameters(
    &self,
    amount: Option<u32>,
    category: Option<&str>,
    difficulty: Option<&str>,
  ) -> Result<QuizParameters, QuizError> {
    QuizParameters::parse(
      amount.unwrap_or(self.defaults.amount),
      category.unwrap_or(&self.defaults.category),
      difficulty.unwrap_or(&self.defaults.difficulty),
    )
  }
}

pub fn parse_quiz_config(s: &str) -> Result<QuizConfig, toml::de::Error> {
  toml::from_str::<QuizConfig>(s)
}

/// Load from QUIZ_CONFIG_PATH (if set), then apply env overrides.
/// IO/parse errors are logged and defaults are used.
pub fn load_quiz_config_from_env() -> QuizConfig {
  let mut cfg = load_file().unwrap_or_default();
  apply_env_overrides(&mut cfg, |k| std::env::var(k).ok());
  cfg
}

fn load_file() -> Option<QuizConfig> {
  let path = std::env::var("QUIZ_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_quiz_config(&s) {
      Ok(cfg) => {
        info!(target: "trivia_quiz", %path, "Loaded quiz config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "trivia_quiz", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "trivia_quiz", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

fn apply_env_overrides(cfg: &mut QuizConfig, var: impl Fn(&str) -> Option<String>) {
  if let Some(url) = var("TRIVIA_API_URL").filter(|s| !s.trim().is_empty()) {
    cfg.bank.base_url = url;
  }
  if let Some(raw) = var("TRIVIA_TIMEOUT_SECS") {
    match raw.parse::<u64>() {
      Ok(secs) => cfg.bank.timeout_secs = secs,
      Err(e) => warn!(target: "trivia_quiz", value = %raw, error = %e, "Ignoring TRIVIA_TIMEOUT_SECS"),
    }
  }
  if let Some(raw) = var("TRIVIA_BANK_ENABLED") {
    cfg.bank.enabled = !matches!(raw.trim().to_ascii_lowercase().as_str(), "0" | "false" | "no" | "off");
  }
}
