//! Turn exchange endpoints.
//!
//! - `POST /v1/chat/stream` — SSE: streams assistant deltas for one turn
//! - `POST /v1/chat`        — non-streaming: drains the turn, returns it whole

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Json};
use futures_util::stream::Stream;
use serde::Deserialize;

use crate::api::wire::{normalize_transcript, WireTurn};
use crate::runtime::{run_turn, TurnEvent, TurnInput};
use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request shape
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    /// Transcript so far, in either wire shape.
    #[serde(default)]
    pub transcript: Vec<WireTurn>,
    pub topic_id: String,
    pub session_id: String,
    /// The new user message for this turn.
    pub message: String,
}

impl ChatBody {
    fn into_input(self) -> TurnInput {
        TurnInput {
            transcript: normalize_transcript(self.transcript),
            topic_id: self.topic_id,
            session_id: self.session_id,
            user_message: self.message,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /v1/chat (non-streaming)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> impl IntoResponse {
    let mut rx = run_turn(state, body.into_input());

    // Drain all events and collect the final response.
    let mut final_content = String::new();
    let mut usage = None;
    let mut errors = Vec::new();

    while let Some(event) = rx.recv().await {
        match event {
            TurnEvent::Final { content } => final_content = content,
            TurnEvent::UsageEvent {
                input_tokens,
                output_tokens,
                total_tokens,
            } => {
                usage = Some(serde_json::json!({
                    "input_tokens": input_tokens,
                    "output_tokens": output_tokens,
                    "total_tokens": total_tokens,
                }));
            }
            TurnEvent::Error { message } => errors.push(message),
            TurnEvent::AssistantDelta { .. } => { /* ignored in non-streaming */ }
        }
    }

    Json(serde_json::json!({
        "content": final_content,
        "usage": usage,
        "errors": errors,
    }))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// POST /v1/chat/stream (SSE)
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

pub async fn chat_stream(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> impl IntoResponse {
    let rx = run_turn(state, body.into_input());

    Sse::new(make_sse_stream(rx)).keep_alive(KeepAlive::default())
}

fn make_sse_stream(
    mut rx: tokio::sync::mpsc::Receiver<TurnEvent>,
) -> impl Stream<Item = Result<Event, std::convert::Infallible>> {
    async_stream::stream! {
        while let Some(event) = rx.recv().await {
            let event_type = match &event {
                TurnEvent::AssistantDelta { .. } => "assistant_delta",
                TurnEvent::Final { .. } => "final",
                TurnEvent::UsageEvent { .. } => "usage",
                TurnEvent::Error { .. } => "error",
            };
            let data = serde_json::to_string(&event).unwrap_or_default();
            yield Ok(Event::default().event(event_type).data(data));
        }
    }
}
