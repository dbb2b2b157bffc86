use serde::{Deserialize, Serialize};

use crate::topics::InterviewTopic;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Interview behavior
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Greeting the client seeds as the opening assistant turn.
    #[serde(default = "d_greeting")]
    pub greeting: String,
    /// Sampling temperature for interviewer turns.
    #[serde(default = "d_temperature")]
    pub temperature: f32,
    /// Extra catalog entries; an entry with a built-in id replaces it.
    #[serde(default)]
    pub topics: Vec<InterviewTopic>,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            greeting: d_greeting(),
            temperature: d_temperature(),
            topics: Vec::new(),
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_greeting() -> String {
    "Hello! Thank you for participating. I am ready to hear your thoughts. \
     Shall we begin?"
        .into()
}
fn d_temperature() -> f32 {
    0.7
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interview_config_defaults() {
        let cfg = InterviewConfig::default();
        assert!(cfg.greeting.starts_with("Hello!"));
        assert!(cfg.topics.is_empty());
    }

    #[test]
    fn interview_config_parses_extra_topics() {
        let toml_str = r#"
            greeting = "Welcome."

            [[topics]]
            id = "exit-interview"
            title = "Exit Interview"
            description = "Tell us why you are leaving."
        "#;
        let cfg: InterviewConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.greeting, "Welcome.");
        assert_eq!(cfg.topics.len(), 1);
        assert_eq!(cfg.topics[0].id, "exit-interview");
        assert_eq!(cfg.topics[0].questions_count, 0);
    }
}
