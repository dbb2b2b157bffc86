//! The structured analysis artifact derived from a completed transcript.

use serde::{Deserialize, Serialize};

/// Sentiment labels the extraction prompt asks the collaborator to choose
/// from. Soft contract: consumers display whatever string comes back rather
/// than rejecting unknown values.
pub const SENTIMENTS: [&str; 4] = ["Positive", "Neutral", "Negative", "Constructive"];

/// Structured analysis of one interview.
///
/// Wire JSON uses snake_case keys (`key_insights`, `focus_area`), matching
/// the fixed extraction schema. Immutable once produced; regenerating for
/// the same session overwrites, it is not versioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: String,
    pub sentiment: String,
    pub key_insights: Vec<String>,
    pub focus_area: String,
}

impl Report {
    /// The clearly-labeled artifact returned when the collaborator call
    /// failed or its output could not be parsed. Returned to the UI but
    /// never persisted.
    pub fn fallback() -> Self {
        Self {
            summary: "We could not generate a structured summary for this \
                      interview. The conversation was recorded, but the \
                      analysis step did not return a readable result."
                .into(),
            sentiment: "Constructive (Mock)".into(),
            key_insights: vec![
                "Report generation fell back to a placeholder".into(),
                "The full transcript is still available".into(),
                "Regenerating the report may succeed".into(),
            ],
            focus_area: "Not available".into(),
        }
    }

    /// True when this is the fallback artifact rather than model output.
    pub fn is_fallback(&self) -> bool {
        self.sentiment.contains("(Mock)")
    }
}
