//! Topic catalog endpoint.

use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

/// GET /v1/topics
pub async fn list_topics(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "topics": state.topics.all() }))
}
