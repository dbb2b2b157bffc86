//! Wire types for the interview record store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use parley_domain::report::Report;
use parley_domain::transcript::Transcript;

/// Persisted lifecycle state of a session record.
///
/// `started` covers the whole active lifetime of the interview; only
/// report completion flips the record to `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Started,
    Completed,
}

/// One interview record as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub topic_id: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub messages: Transcript,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SessionStatus::Started).unwrap(),
            r#""started""#
        );
        assert_eq!(
            serde_json::to_string(&SessionStatus::Completed).unwrap(),
            r#""completed""#
        );
    }

    #[test]
    fn record_parses_minimal_row() {
        let json = r#"{
            "id": "abc-123",
            "topic_id": "event-feedback",
            "status": "started"
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "abc-123");
        assert!(record.messages.is_empty());
        assert!(record.report.is_none());
    }

    #[test]
    fn record_round_trips_with_report() {
        let json = r#"{
            "id": "abc-123",
            "topic_id": "user-interview",
            "status": "completed",
            "messages": [{"id": "t1", "role": "assistant", "content": "hi"}],
            "report": {
                "summary": "s",
                "sentiment": "Positive",
                "key_insights": ["a"],
                "focus_area": "f"
            }
        }"#;
        let record: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, SessionStatus::Completed);
        assert_eq!(record.messages.len(), 1);
        assert_eq!(record.report.as_ref().unwrap().sentiment, "Positive");
    }
}
