//! Google Gemini adapter.
//!
//! Implements the Gemini `generateContent` and `streamGenerateContent` APIs.
//! Auth is via an API key passed as a query parameter (`key={api_key}`).

use std::time::Duration;

use parley_domain::config::CollabConfig;
use parley_domain::error::{Error, Result};
use parley_domain::stream::{BoxStream, StreamEvent, Usage};
use serde_json::Value;

use crate::sse::sse_response_stream;
use crate::traits::{ChatMessage, ChatRequest, ChatResponse, ChatRole, Collaborator};
use crate::util::{from_reqwest, resolve_api_key};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Adapter struct
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A collaborator adapter for the Google Gemini API.
pub struct GeminiCollaborator {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiCollaborator {
    /// Build an adapter from the `[collab]` config section.
    ///
    /// The client timeout is the hard upper bound on a single collaborator
    /// call; there are no retries.
    pub fn from_config(cfg: &CollabConfig) -> Result<Self> {
        let api_key = resolve_api_key(cfg)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(from_reqwest)?;

        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            model: cfg.model.clone(),
            api_key,
            client,
        })
    }

    // ── Internal helpers ───────────────────────────────────────────

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse&key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Request serialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn build_body(req: &ChatRequest) -> Value {
    let contents: Vec<Value> = req.messages.iter().map(message_to_gemini).collect();

    let mut body = serde_json::json!({
        "contents": contents,
    });

    if let Some(ref system) = req.system {
        body["systemInstruction"] = serde_json::json!({
            "parts": [{"text": system}]
        });
    }

    // Generation config.
    let mut gen_config = serde_json::json!({});
    if let Some(temp) = req.temperature {
        gen_config["temperature"] = serde_json::json!(temp);
    }
    if let Some(max) = req.max_tokens {
        gen_config["maxOutputTokens"] = serde_json::json!(max);
    }
    if gen_config.as_object().is_some_and(|o| !o.is_empty()) {
        body["generationConfig"] = gen_config;
    }

    body
}

fn message_to_gemini(msg: &ChatMessage) -> Value {
    // Gemini calls the assistant role "model".
    let role = match msg.role {
        ChatRole::User => "user",
        ChatRole::Assistant => "model",
    };
    serde_json::json!({
        "role": role,
        "parts": [{"text": msg.content}],
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Response deserialization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn parse_generate_response(body: &Value, model: &str) -> Result<ChatResponse> {
    let candidate = body
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
        .ok_or_else(|| Error::Collaborator {
            provider: "gemini".into(),
            message: "no candidates in response".into(),
        })?;

    let mut content = String::new();
    if let Some(parts) = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        for part in parts {
            if let Some(text) = part.get("text").and_then(|v| v.as_str()) {
                content.push_str(text);
            }
        }
    }

    let finish_reason = candidate
        .get("finishReason")
        .and_then(|v| v.as_str())
        .map(normalize_finish_reason);

    let usage = body.get("usageMetadata").and_then(parse_usage);

    Ok(ChatResponse {
        content,
        usage,
        model: model.to_string(),
        finish_reason,
    })
}

fn normalize_finish_reason(raw: &str) -> String {
    match raw {
        "STOP" => "stop".to_string(),
        "MAX_TOKENS" => "length".to_string(),
        other => other.to_lowercase(),
    }
}

fn parse_usage(v: &Value) -> Option<Usage> {
    let prompt = v.get("promptTokenCount")?.as_u64()? as u32;
    let completion = v.get("candidatesTokenCount")?.as_u64().unwrap_or(0) as u32;
    let total = v
        .get("totalTokenCount")
        .and_then(|v| v.as_u64())
        .unwrap_or((prompt + completion) as u64) as u32;
    Some(Usage {
        prompt_tokens: prompt,
        completion_tokens: completion,
        total_tokens: total,
    })
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Streaming helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Parse a single Gemini streaming SSE data payload.
fn parse_stream_data(data: &str) -> Vec<Result<StreamEvent>> {
    let mut events = Vec::new();

    let v: Value = match serde_json::from_str(data) {
        Ok(v) => v,
        Err(e) => {
            events.push(Err(Error::Json(e)));
            return events;
        }
    };

    let candidate = match v
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|a| a.first())
    {
        Some(c) => c,
        None => return events,
    };

    if let Some(parts) = candidate
        .get("content")
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
    {
        for part in parts {
            if let Some(text) = part.get("text").and_then(|v| v.as_str()) {
                if !text.is_empty() {
                    events.push(Ok(StreamEvent::Token {
                        text: text.to_string(),
                    }));
                }
            }
        }
    }

    if let Some(fr) = candidate.get("finishReason").and_then(|v| v.as_str()) {
        let usage = v.get("usageMetadata").and_then(parse_usage);
        events.push(Ok(StreamEvent::Done {
            usage,
            finish_reason: Some(normalize_finish_reason(fr)),
        }));
    }

    events
}

/// Redact the API key from a URL for safe logging.
fn redact_url_key(url: &str) -> String {
    if let Some(idx) = url.find("key=") {
        let prefix = &url[..idx + 4];
        let rest = &url[idx + 4..];
        let end = rest.find('&').unwrap_or(rest.len());
        format!("{prefix}[REDACTED]{}", &rest[end..])
    } else {
        url.to_string()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait::async_trait]
impl Collaborator for GeminiCollaborator {
    async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
        let url = self.generate_url();
        let body = build_body(&req);

        tracing::debug!(model = %self.model, url = %redact_url_key(&url), "gemini chat request");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        let resp_text = resp.text().await.map_err(from_reqwest)?;

        if !status.is_success() {
            return Err(Error::Collaborator {
                provider: "gemini".into(),
                message: format!("HTTP {} - {}", status.as_u16(), resp_text),
            });
        }

        let resp_json: Value = serde_json::from_str(&resp_text)?;
        parse_generate_response(&resp_json, &self.model)
    }

    async fn chat_stream(
        &self,
        req: ChatRequest,
    ) -> Result<BoxStream<'static, Result<StreamEvent>>> {
        let url = self.stream_url();
        let body = build_body(&req);

        tracing::debug!(model = %self.model, url = %redact_url_key(&url), "gemini stream request");

        let resp = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = resp.status();
        if !status.is_success() {
            let err_text = resp.text().await.map_err(from_reqwest)?;
            return Err(Error::Collaborator {
                provider: "gemini".into(),
                message: format!("HTTP {} - {}", status.as_u16(), err_text),
            });
        }

        Ok(sse_response_stream(resp, parse_stream_data))
    }

    fn provider_id(&self) -> &str {
        "gemini"
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_body_maps_roles_and_system() {
        let req = ChatRequest {
            system: Some("interview the user".into()),
            messages: vec![
                ChatMessage::assistant("Shall we begin?"),
                ChatMessage::user("Yes"),
            ],
            temperature: Some(0.7),
            max_tokens: None,
        };
        let body = build_body(&req);

        assert_eq!(body["contents"][0]["role"], "model");
        assert_eq!(body["contents"][1]["role"], "user");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "Yes");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "interview the user"
        );
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn build_body_omits_empty_generation_config() {
        let req = ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            ..Default::default()
        };
        let body = build_body(&req);
        assert!(body.get("generationConfig").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn parse_generate_response_extracts_text_and_usage() {
        let body = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Thanks "}, {"text": "for sharing."}]},
                "finishReason": "STOP",
            }],
            "usageMetadata": {
                "promptTokenCount": 10,
                "candidatesTokenCount": 5,
                "totalTokenCount": 15,
            }
        });
        let resp = parse_generate_response(&body, "gemini-1.5-flash").unwrap();
        assert_eq!(resp.content, "Thanks for sharing.");
        assert_eq!(resp.finish_reason.as_deref(), Some("stop"));
        assert_eq!(resp.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn parse_generate_response_without_candidates_errors() {
        let body = serde_json::json!({ "candidates": [] });
        assert!(parse_generate_response(&body, "m").is_err());
    }

    #[test]
    fn parse_stream_data_yields_tokens_then_done() {
        let data = r#"{
            "candidates": [{
                "content": {"parts": [{"text": "chunk"}]},
                "finishReason": "STOP"
            }]
        }"#;
        let events: Vec<_> = parse_stream_data(data)
            .into_iter()
            .map(|e| e.unwrap())
            .collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], StreamEvent::Token { text } if text == "chunk"));
        assert!(matches!(&events[1], StreamEvent::Done { .. }));
    }

    #[test]
    fn parse_stream_data_invalid_json_is_an_error_event() {
        let events = parse_stream_data("not json");
        assert_eq!(events.len(), 1);
        assert!(events[0].is_err());
    }

    #[test]
    fn redact_url_key_masks_the_secret() {
        let url = "https://example.com/v1beta/models/m:generateContent?key=secret123";
        let redacted = redact_url_key(url);
        assert!(!redacted.contains("secret123"));
        assert!(redacted.contains("key=[REDACTED]"));
    }
}
