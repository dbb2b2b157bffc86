//! The interview runtime — the turn exchange engine and the report
//! generator, shared between the streaming and non-streaming endpoints.

pub mod report;
pub mod turn;

pub use turn::{run_turn, TurnEvent, TurnInput};

use parley_collab::{ChatMessage, ChatRole};
use parley_domain::topics::TopicCatalog;
use parley_domain::transcript::{Role, Transcript};

/// Build the interviewer system instruction for a topic.
///
/// Parameterized only by the topic — per-turn state lives entirely in the
/// transcript. Known topic ids are expanded with their catalog title and
/// description; unknown ids pass through verbatim.
pub(crate) fn interviewer_prompt(topics: &TopicCatalog, topic_id: &str) -> String {
    let subject = match topics.get(topic_id) {
        Some(topic) => format!("{} — {}", topic.title, topic.description),
        None => topic_id.to_string(),
    };

    format!(
        "You are an AI interviewer conducting a professional interview about: {subject}.\n\
         Your goal is to ask insightful questions to gather feedback or opinions.\n\
         \n\
         Guidelines:\n\
         - Ask one question at a time.\n\
         - Be polite, professional, and encouraging.\n\
         - Keep your responses concise (under 3 sentences).\n\
         - If the user gives a short answer, ask for elaboration.\n\
         - Start the conversation by introducing the topic if it's the first message.\n"
    )
}

/// Map the canonical transcript onto collaborator messages.
pub(crate) fn transcript_to_messages(transcript: &Transcript) -> Vec<ChatMessage> {
    transcript
        .turns()
        .iter()
        .map(|t| ChatMessage {
            role: match t.role {
                Role::User => ChatRole::User,
                Role::Assistant => ChatRole::Assistant,
            },
            content: t.content.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_domain::transcript::Turn;

    #[test]
    fn prompt_uses_catalog_title_for_known_topics() {
        let topics = TopicCatalog::builtin();
        let prompt = interviewer_prompt(&topics, "event-feedback");
        assert!(prompt.contains("Event Feedback"));
        assert!(prompt.contains("one question at a time"));
    }

    #[test]
    fn prompt_passes_unknown_topic_id_through() {
        let topics = TopicCatalog::builtin();
        let prompt = interviewer_prompt(&topics, "something-custom");
        assert!(prompt.contains("something-custom"));
    }

    #[test]
    fn transcript_maps_onto_chat_roles() {
        let mut t = Transcript::new();
        t.push(Turn::assistant("hello"));
        t.push(Turn::user("hi"));

        let messages = transcript_to_messages(&t);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::Assistant);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "hi");
    }
}
