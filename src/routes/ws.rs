//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::logic::*;
use crate::protocol::{categories_out, ClientWsMessage, ServerWsMessage};
use crate::state::AppState;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "trivia_quiz", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "trivia_quiz", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let out = reply_for_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "trivia_quiz", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "trivia_quiz", "WebSocket disconnected");
}

/// Parse, dispatch, serialize.
async fn reply_for_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "trivia_quiz", "WS received: {:?}", &incoming);
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  let result = match msg {
    ClientWsMessage::Ping => return ServerWsMessage::Pong,
    ClientWsMessage::Categories => return ServerWsMessage::Categories { categories: categories_out() },
    ClientWsMessage::Session => return ServerWsMessage::Session { session: state.view().await },

    ClientWsMessage::Start(req) => start_quiz(state, req).await.map(|session| ServerWsMessage::Session { session }),

    ClientWsMessage::Answer { choice } => submit_answer(state, &choice)
      .await
      .map(|(feedback, session)| ServerWsMessage::AnswerResult { feedback, message: feedback.message(), session }),

    ClientWsMessage::Next => next_question(state).await.map(|session| ServerWsMessage::Session { session }),

    ClientWsMessage::Reset => reset_quiz(state).await.map(|session| ServerWsMessage::Session { session }),
  };

  result.unwrap_or_else(|e| ServerWsMessage::Error { message: e.to_string() })
}
