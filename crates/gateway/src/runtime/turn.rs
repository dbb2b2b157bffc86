//! Turn exchange engine — one request/response cycle with the collaborator.
//!
//! Entry point: [`run_turn`] spawns the exchange and returns a channel of
//! [`TurnEvent`]s. The in-memory append is visible to the caller (the
//! `final` event) before the persistence call resolves; persistence is
//! best-effort, skipped for mock sessions, and never retried.

use futures_util::StreamExt;
use serde::Serialize;
use tokio::sync::mpsc;

use parley_collab::ChatRequest;
use parley_domain::stream::StreamEvent;
use parley_domain::transcript::{Transcript, Turn};

use crate::state::AppState;

use super::{interviewer_prompt, transcript_to_messages};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// TurnEvent — the SSE event type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Events emitted during a single interview turn.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum TurnEvent {
    /// Incremental text from the assistant.
    #[serde(rename = "assistant_delta")]
    AssistantDelta { text: String },

    /// The finalized assistant message (full text).
    #[serde(rename = "final")]
    Final { content: String },

    /// An error occurred; terminal for the turn.
    #[serde(rename = "error")]
    Error { message: String },

    /// Token usage for the turn.
    #[serde(rename = "usage")]
    UsageEvent {
        input_tokens: u32,
        output_tokens: u32,
        total_tokens: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Run parameters
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Input to a single turn.
pub struct TurnInput {
    /// Transcript so far, ending with the previous assistant turn.
    pub transcript: Transcript,
    pub topic_id: String,
    pub session_id: String,
    /// The new user message.
    pub user_message: String,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// run_turn — the exchange loop
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Run one interview turn.
///
/// Returns a channel receiver of [`TurnEvent`]s (read incrementally for
/// SSE, or drained for the non-streaming endpoint). Dropping the receiver
/// mid-stream abandons the turn: no partial assistant turn is persisted.
pub fn run_turn(state: AppState, input: TurnInput) -> mpsc::Receiver<TurnEvent> {
    let (tx, rx) = mpsc::channel::<TurnEvent>(64);

    tokio::spawn(async move {
        if let Err(e) = run_turn_inner(state, input, tx.clone()).await {
            let _ = tx
                .send(TurnEvent::Error {
                    message: format!("{e} — check your API key and network"),
                })
                .await;
        }
    });

    rx
}

async fn run_turn_inner(
    state: AppState,
    input: TurnInput,
    tx: mpsc::Sender<TurnEvent>,
) -> parley_domain::error::Result<()> {
    // 1. Build the system instruction and the conversation, including the
    //    new user turn.
    let system = interviewer_prompt(&state.topics, &input.topic_id);
    let mut transcript = input.transcript;
    transcript.push(Turn::user(&input.user_message));

    let req = ChatRequest {
        system: Some(system),
        messages: transcript_to_messages(&transcript),
        temperature: Some(state.config.interview.temperature),
        max_tokens: None,
    };

    // 2. Stream the assistant response.
    let mut stream = state.collab.chat_stream(req).await?;
    let mut text_buf = String::new();
    let mut usage = None;

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::Token { text } => {
                text_buf.push_str(&text);
                if tx.send(TurnEvent::AssistantDelta { text }).await.is_err() {
                    // Receiver dropped: the caller cancelled. Abandon the
                    // turn without committing a partial assistant message.
                    tracing::debug!(
                        session_id = %input.session_id,
                        "turn cancelled mid-stream"
                    );
                    return Ok(());
                }
            }
            StreamEvent::Done { usage: u, .. } => usage = u,
        }
    }

    // 3. Finalize. The appended turn reaches the caller before any
    //    persistence happens.
    transcript.push(Turn::assistant(&text_buf));
    let _ = tx.send(TurnEvent::Final { content: text_buf }).await;

    if let Some(u) = usage {
        let _ = tx
            .send(TurnEvent::UsageEvent {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .await;
    }

    // 4. Best-effort persistence, real sessions only.
    persist_messages(&state, &input.session_id, &transcript).await;

    Ok(())
}

/// Overwrite the session's `messages` field with the full transcript.
///
/// Skipped for mock sessions and unconfigured stores; failures are logged
/// and never retried (the client retains a local copy as fallback).
async fn persist_messages(state: &AppState, session_id: &str, transcript: &Transcript) {
    if parley_sessions::is_mock_session_id(session_id) {
        return;
    }
    let Some(store) = state.store.as_ref() else {
        return;
    };
    if let Err(e) = store.update_messages(session_id, transcript).await {
        tracing::warn!(error = %e, session_id, "transcript persistence failed");
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
