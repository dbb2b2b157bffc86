//! Interview session endpoints.
//!
//! - `POST /v1/interviews`     — create a session (never fails; may be mock)
//! - `GET  /v1/interviews`     — admin listing of stored sessions
//! - `GET  /v1/interviews/:id` — one stored record, for the report page

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::api::api_error;
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /v1/interviews
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct CreateInterviewBody {
    pub topic_id: String,
}

/// Create a new interview session.
///
/// Always 2xx: when the store is unconfigured or the insert fails, the
/// response carries a mock id (with `mock: true`) instead of an error. The
/// greeting is included so the client can seed the opening assistant turn.
pub async fn create_interview(
    State(state): State<AppState>,
    Json(body): Json<CreateInterviewBody>,
) -> impl IntoResponse {
    let handle = state.sessions.create(&body.topic_id).await;

    let mut resp = serde_json::json!({
        "id": handle.id,
        "greeting": state.config.interview.greeting,
    });
    if handle.mock {
        resp["mock"] = serde_json::Value::Bool(true);
    }
    Json(resp)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/interviews
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Admin listing of stored sessions, newest first.
///
/// Degrades to an empty listing with `configured: false` when the store is
/// absent, so the admin page renders without a backend.
pub async fn list_interviews(State(state): State<AppState>) -> Response {
    let Some(store) = state.store.as_ref() else {
        return Json(serde_json::json!({
            "configured": false,
            "interviews": [],
        }))
        .into_response();
    };

    match store.list_sessions().await {
        Ok(records) => Json(serde_json::json!({
            "configured": true,
            "interviews": records,
        }))
        .into_response(),
        Err(e) => api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("listing sessions: {e}"),
        ),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GET /v1/interviews/:id
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One stored record, as consumed by the report page.
pub async fn get_interview(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    if parley_sessions::is_mock_session_id(&id) {
        return api_error(StatusCode::NOT_FOUND, "mock sessions are not persisted");
    }

    let Some(store) = state.store.as_ref() else {
        return api_error(StatusCode::SERVICE_UNAVAILABLE, "record store not configured");
    };

    match store.fetch_session(&id).await {
        Ok(record) => Json(record).into_response(),
        Err(e) => api_error(StatusCode::NOT_FOUND, e.to_string()),
    }
}
