//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::category::CATEGORIES;
use crate::domain::Feedback;
use crate::session::SessionView;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    Categories,
    Session,
    Start(StartIn),
    Answer { choice: String },
    Next,
    Reset,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Categories { categories: Vec<CategoryOut> },
    Session { session: SessionView },
    AnswerResult {
        feedback: Feedback,
        message: &'static str,
        session: SessionView,
    },
    Error { message: String },
}

//
// HTTP request/response DTOs
//

/// Start request. Missing fields fall back to the configured defaults.
#[derive(Debug, Default, Deserialize)]
pub struct StartIn {
    #[serde(default)]
    pub amount: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerIn {
    pub choice: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerOut {
    pub feedback: Feedback,
    pub message: &'static str,
    pub session: SessionView,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryOut {
    pub name: &'static str,
    pub id: Option<u8>,
}

/// "any" first, then the bank vocabulary in id order.
pub fn categories_out() -> Vec<CategoryOut> {
    std::iter::once(CategoryOut { name: "any", id: None })
        .chain(CATEGORIES.iter().map(|(id, name)| CategoryOut { name: *name, id: Some(*id) }))
        .collect()
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub bank_enabled: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}
