pub mod chat;
pub mod health;
pub mod interviews;
pub mod report;
pub mod topics;
pub mod wire;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health probe
        .route("/v1/health", get(health::health))
        // Topic catalog
        .route("/v1/topics", get(topics::list_topics))
        // Interview sessions
        .route(
            "/v1/interviews",
            post(interviews::create_interview).get(interviews::list_interviews),
        )
        .route("/v1/interviews/:id", get(interviews::get_interview))
        // Turn exchange
        .route("/v1/chat", post(chat::chat))
        .route("/v1/chat/stream", post(chat::chat_stream))
        // Report generation
        .route("/v1/report", post(report::post_report))
}

/// Build a standardized JSON error response: `{ "error": "<message>" }`.
pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(serde_json::json!({ "error": message.into() }))).into_response()
}
