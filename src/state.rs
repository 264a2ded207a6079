//! Application state: the single live quiz session, the question source and config.
//!
//! This module owns:
//!   - the quiz session (one per process, behind a RwLock)
//!   - the question source (remote bank client or offline fallback)
//!   - the loaded configuration (bank endpoint + default parameters)
//!
//! `start` never holds the session lock across the bank request: it moves the
//! session to Loading, releases the lock, fetches, then installs the batch only
//! if the same attempt is still live. Fetch and install run in their own task,
//! so a caller that goes away mid-fetch cannot strand the session in Loading.

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn, Instrument};

use crate::bank::{OpenTriviaDb, QuestionBank};
use crate::config::{load_quiz_config_from_env, QuizConfig};
use crate::domain::{Feedback, QuizParameters};
use crate::error::QuizError;
use crate::session::{QuizSession, SessionView};
use crate::source::QuestionSource;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<QuizSession>>,
    pub source: QuestionSource,
    pub config: QuizConfig,
}

impl AppState {
    /// Build state from env: load config, init the bank client.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_quiz_config_from_env();

        let bank = OpenTriviaDb::from_config(&config.bank);
        if let Some(b) = &bank {
            info!(target: "trivia_quiz", base_url = %b.base_url, timeout_secs = config.bank.timeout_secs, "Question bank enabled.");
        } else {
            warn!(target: "trivia_quiz", "Question bank disabled. Serving the built-in sample questions.");
        }
        let source = match bank {
            Some(b) => QuestionSource::new(Some(Arc::new(b) as Arc<dyn QuestionBank>)),
            None => QuestionSource::offline(),
        };

        Self::with_parts(config, source)
    }

    pub fn with_parts(config: QuizConfig, source: QuestionSource) -> Self {
        Self {
            session: Arc::new(RwLock::new(QuizSession::new())),
            source,
            config,
        }
    }

    /// Setup → Loading → Active. Rejected unless the session is in Setup.
    #[instrument(level = "info", skip(self))]
    pub async fn start(&self, params: QuizParameters) -> Result<SessionView, QuizError> {
        let attempt = { self.session.write().await.begin(params)? };

        let session = Arc::clone(&self.session);
        let source = self.source.clone();
        let commit = tokio::spawn(
            async move {
                let outcome = source.fetch(&params).await;
                let mut session = session.write().await;
                if session.install(attempt, outcome) {
                    info!(target: "quiz", %attempt, total = session.questions().len(), "Quiz started");
                }
                session.view()
            }
            .in_current_span(),
        );

        match commit.await {
            Ok(view) => Ok(view),
            Err(e) => {
                error!(target: "quiz", %attempt, error = %e, "Question load task failed");
                let mut session = self.session.write().await;
                session.abandon(attempt);
                Err(QuizError::Internal(format!("question load failed: {e}")))
            }
        }
    }

    #[instrument(level = "debug", skip(self), fields(choice_len = choice.len()))]
    pub async fn answer(&self, choice: &str) -> Result<(Feedback, SessionView), QuizError> {
        let mut session = self.session.write().await;
        let feedback = session.answer(choice)?;
        Ok((feedback, session.view()))
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn next(&self) -> Result<SessionView, QuizError> {
        let mut session = self.session.write().await;
        session.next()?;
        Ok(session.view())
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn reset(&self) -> Result<SessionView, QuizError> {
        let mut session = self.session.write().await;
        session.reset()?;
        Ok(session.view())
    }

    pub async fn view(&self) -> SessionView {
        self.session.read().await.view()
    }
}
