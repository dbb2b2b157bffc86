//! Report generator — one extraction call over a finalized transcript.
//!
//! The collaborator is asked for a bare JSON object; code fences are
//! stripped defensively anyway before the strict parse. Any model-side
//! failure (transport or schema) is absorbed into the clearly-labeled
//! fallback report, so the caller always gets something renderable.

use parley_collab::{ChatMessage, ChatRequest};
use parley_domain::error::{Error, Result};
use parley_domain::report::Report;
use parley_domain::transcript::Transcript;

use crate::state::AppState;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Prompt & parsing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Build the fixed extraction instruction for a topic.
fn extraction_prompt(topic_id: &str) -> String {
    format!(
        "You are an expert analyst. You have just conducted an interview on the topic: {topic_id}.\n\
         Analyze the following conversation and provide a structured report.\n\
         \n\
         Return the response in JSON format (do not wrap in markdown code blocks) with the following keys:\n\
         - summary (string): A paragraph summarizing the user's feedback.\n\
         - sentiment (string): One of 'Positive', 'Neutral', 'Negative', 'Constructive'.\n\
         - key_insights (array of strings): 3 key takeaways.\n\
         - focus_area (string): The main area the user seemed concerned about.\n"
    )
}

/// Strip markdown code fences the model may emit despite instructions.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Parse the collaborator's output into a [`Report`], fences stripped.
fn parse_report(text: &str) -> Result<Report> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(&cleaned).map_err(|e| Error::MalformedReport(e.to_string()))
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Generation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generate (and best-effort persist) the report for a transcript.
///
/// Precondition: the transcript is non-empty (the resolver enforces this).
/// Never fails: transport and parse failures degrade to the fallback
/// artifact, which is returned but not persisted. Regenerating for the
/// same session simply overwrites the stored report.
pub async fn generate_report(
    state: &AppState,
    transcript: &Transcript,
    topic_id: &str,
    session_id: Option<&str>,
) -> Report {
    let req = ChatRequest {
        system: Some(extraction_prompt(topic_id)),
        messages: vec![ChatMessage::user(transcript.render())],
        temperature: None,
        max_tokens: None,
    };

    let response = match state.collab.chat(req).await {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, topic_id, "report call failed — returning fallback report");
            return Report::fallback();
        }
    };

    let report = match parse_report(&response.content) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, topic_id, "report output unparseable — returning fallback report");
            return Report::fallback();
        }
    };

    persist_report(state, session_id, &report).await;
    report
}

/// Attach the report and flip the session to `completed`.
///
/// Real sessions with a configured store only; a persistence failure is
/// logged and the report is still returned to the caller.
async fn persist_report(state: &AppState, session_id: Option<&str>, report: &Report) {
    let Some(id) = session_id else {
        return;
    };
    if parley_sessions::is_mock_session_id(id) {
        return;
    }
    let Some(store) = state.store.as_ref() else {
        return;
    };
    if let Err(e) = store.save_report(id, report).await {
        tracing::warn!(error = %e, session_id = id, "report persistence failed");
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
