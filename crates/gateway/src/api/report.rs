//! Report generation endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use parley_domain::error::Error;
use parley_sessions::resolve_transcript;

use crate::api::wire::{normalize_transcript, WireTurn};
use crate::api::api_error;
use crate::runtime::report::generate_report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportBody {
    /// Client-held transcript copy; wins over the persisted one when
    /// non-empty.
    #[serde(default)]
    pub transcript: Option<Vec<WireTurn>>,
    pub topic_id: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// POST /v1/report
///
/// 400 only when no transcript resolves; model-side failures come back as
/// a 200 fallback report rather than an error status.
pub async fn post_report(
    State(state): State<AppState>,
    Json(body): Json<ReportBody>,
) -> Response {
    let client_transcript = body.transcript.map(normalize_transcript);

    let transcript = match resolve_transcript(
        client_transcript,
        body.session_id.as_deref(),
        &state.store,
    )
    .await
    {
        Ok(t) => t,
        Err(Error::NoContent) => {
            return api_error(StatusCode::BAD_REQUEST, "no messages to summarize");
        }
        Err(e) => {
            return api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("resolving transcript: {e}"),
            );
        }
    };

    let report = generate_report(
        &state,
        &transcript,
        &body.topic_id,
        body.session_id.as_deref(),
    )
    .await;

    Json(report).into_response()
}
