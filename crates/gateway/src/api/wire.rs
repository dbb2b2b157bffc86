//! Boundary normalization of transcript payloads.
//!
//! Clients send turns in one of two shapes: the canonical flat form
//! (`content` string) or the transitional parts form
//! (`parts: [{type: "text", text: ...}]`). Both are folded into the
//! canonical [`Turn`] here, at ingress; only the flat shape exists
//! internally.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use parley_domain::transcript::{Role, Transcript, Turn};

/// A turn as it may arrive on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTurn {
    #[serde(default)]
    pub id: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One element of the transitional parts shape. Non-text parts are dropped
/// during normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WirePart {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl WireTurn {
    /// Collapse to the canonical turn: flat content wins; otherwise the
    /// text parts are concatenated.
    pub fn into_turn(self) -> Turn {
        let content = match self.content {
            Some(c) => c,
            None => self
                .parts
                .into_iter()
                .filter_map(|p| match p {
                    WirePart::Text { text } => Some(text),
                    WirePart::Other => None,
                })
                .collect::<Vec<_>>()
                .join(""),
        };
        Turn {
            id: self
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            role: self.role,
            content,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// Normalize a wire transcript into the canonical ordered form.
pub fn normalize_transcript(turns: Vec<WireTurn>) -> Transcript {
    let mut transcript = Transcript::new();
    for wire_turn in turns {
        transcript.push(wire_turn.into_turn());
    }
    transcript
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
