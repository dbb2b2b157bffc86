//! The interview topic catalog.
//!
//! Topics are presentation-level metadata: the interviewer prompt uses the
//! title and description when the id is known, and falls back to the raw id
//! otherwise, so unknown topic ids are always accepted.

use serde::{Deserialize, Serialize};

/// One entry in the topic catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewTopic {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub questions_count: u32,
    #[serde(default)]
    pub duration_minutes: u32,
    /// Icon name, passed through to the client verbatim.
    #[serde(default)]
    pub icon: String,
    /// Style classes, passed through to the client verbatim.
    #[serde(default)]
    pub color: String,
}

/// Lookup table over the built-in topics plus any configured extras.
#[derive(Debug, Clone)]
pub struct TopicCatalog {
    topics: Vec<InterviewTopic>,
}

impl TopicCatalog {
    /// Catalog with only the built-in topics.
    pub fn builtin() -> Self {
        Self {
            topics: builtin_topics(),
        }
    }

    /// Built-ins plus configured extras; an extra with a built-in id
    /// replaces the built-in entry.
    pub fn with_extras(extras: &[InterviewTopic]) -> Self {
        let mut topics = builtin_topics();
        for extra in extras {
            match topics.iter_mut().find(|t| t.id == extra.id) {
                Some(existing) => *existing = extra.clone(),
                None => topics.push(extra.clone()),
            }
        }
        Self { topics }
    }

    pub fn get(&self, id: &str) -> Option<&InterviewTopic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn all(&self) -> &[InterviewTopic] {
        &self.topics
    }
}

impl Default for TopicCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_topics() -> Vec<InterviewTopic> {
    vec![
        InterviewTopic {
            id: "event-feedback".into(),
            title: "Event Feedback".into(),
            description: "Share your thoughts on the recent event.".into(),
            questions_count: 5,
            duration_minutes: 5,
            icon: "mic".into(),
            color: "bg-blue-100 text-blue-600".into(),
        },
        InterviewTopic {
            id: "policy-hearing".into(),
            title: "Policy Hearing".into(),
            description: "Discuss your views on the new company policy.".into(),
            questions_count: 10,
            duration_minutes: 15,
            icon: "file-text".into(),
            color: "bg-green-100 text-green-600".into(),
        },
        InterviewTopic {
            id: "user-interview".into(),
            title: "User Interview".into(),
            description: "Help us improve our product with your feedback.".into(),
            questions_count: 7,
            duration_minutes: 10,
            icon: "users".into(),
            color: "bg-purple-100 text-purple-600".into(),
        },
    ]
}
