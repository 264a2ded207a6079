//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static frontend from `./static` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // HTTP API
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/categories", get(http::http_get_categories))
        .route("/api/v1/session", get(http::http_get_session))
        .route("/api/v1/start", post(http::http_post_start))
        .route("/api/v1/answer", post(http::http_post_answer))
        .route("/api/v1/next", post(http::http_post_next))
        .route("/api/v1/reset", post(http::http_post_reset))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback_service(static_service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QuizConfig;
    use crate::source::QuestionSource;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        build_router(Arc::new(AppState::with_parts(QuizConfig::default(), QuestionSource::offline())))
    }

    async fn call(router: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let res = router.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn health_reports_offline_bank() {
        let (status, v) = call(&app(), "GET", "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["ok"], true);
        assert_eq!(v["bank_enabled"], false);
    }

    #[tokio::test]
    async fn lists_categories() {
        let (_, v) = call(&app(), "GET", "/api/v1/categories", None).await;
        assert_eq!(v.as_array().unwrap().len(), 25);
        assert_eq!(v[1]["name"], "General Knowledge");
    }

    #[tokio::test]
    async fn start_without_body_uses_defaults() {
        let router = app();
        let (status, v) = call(&router, "POST", "/api/v1/start", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["phase"], "active");
        assert_eq!(v["parameters"]["amount"], 5);
        assert_eq!(v["origin"], "fallback");
    }

    #[tokio::test]
    async fn bad_parameters_are_400() {
        let (status, v) = call(&app(), "POST", "/api/v1/start", Some(r#"{"amount":99}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(v["error"].as_str().unwrap().contains("amount"));
    }

    #[tokio::test]
    async fn unreadable_start_body_is_400_and_leaves_setup() {
        let router = app();
        let (status, v) = call(&router, "POST", "/api/v1/start", Some(r#"{"amount":-3,"difficulty":"hard"}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(v["error"].as_str().unwrap().contains("invalid quiz parameters"));

        let (_, v) = call(&router, "GET", "/api/v1/session", None).await;
        assert_eq!(v["phase"], "setup");
    }

    #[tokio::test]
    async fn out_of_order_calls_are_409() {
        let router = app();
        let (status, _) = call(&router, "POST", "/api/v1/next", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        call(&router, "POST", "/api/v1/start", Some(r#"{"amount":1}"#)).await;
        let (status, _) = call(&router, "POST", "/api/v1/next", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        let (status, _) = call(&router, "POST", "/api/v1/answer", Some(r#"{"choice":"Atlantis"}"#)).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn plays_through_to_results_and_resets() {
        let router = app();
        call(&router, "POST", "/api/v1/start", Some(r#"{"amount":3,"category":"any"}"#)).await;

        for choice in ["Paris", "Mars", "Harper Lee"] {
            let (status, v) = call(&router, "POST", "/api/v1/answer", Some(&format!(r#"{{"choice":"{choice}"}}"#))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(v["feedback"], "correct");
            call(&router, "POST", "/api/v1/next", None).await;
        }

        let (_, v) = call(&router, "GET", "/api/v1/session", None).await;
        assert_eq!(v["phase"], "results");
        assert_eq!(v["score"], 3);
        assert_eq!(v["review"].as_array().unwrap().len(), 3);

        let (status, v) = call(&router, "POST", "/api/v1/reset", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["phase"], "setup");
    }
}
