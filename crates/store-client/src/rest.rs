//! REST implementation of [`InterviewStore`] against a PostgREST-style
//! records API (the wire protocol Supabase exposes).
//!
//! Single-attempt by design: the transcript lifecycle treats the store as
//! best-effort, so every failure maps to `StoreUnavailable` and the caller
//! degrades instead of retrying.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;

use parley_domain::config::StoreConfig;
use parley_domain::error::{Error, Result};
use parley_domain::report::Report;
use parley_domain::transcript::Transcript;

use crate::provider::InterviewStore;
use crate::types::SessionRecord;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST client for the interview record store.
///
/// Created once at bootstrap and shared; the underlying `reqwest::Client`
/// maintains a connection pool.
#[derive(Debug, Clone)]
pub struct RestInterviewStore {
    http: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl RestInterviewStore {
    /// Build a client from the `[store]` config section.
    ///
    /// Returns `StoreUnavailable` when no URL is configured or the API key
    /// cannot be resolved — bootstrap treats that as "run without a store",
    /// not as a startup failure.
    pub fn from_config(cfg: &StoreConfig) -> Result<Self> {
        let base_url = cfg
            .url
            .as_deref()
            .ok_or_else(|| Error::StoreUnavailable("no store URL configured".into()))?;

        let api_key = match cfg.api_key {
            Some(ref key) => {
                tracing::warn!(
                    "store API key loaded from plaintext config field 'api_key' — \
                     prefer setting the {} environment variable instead",
                    cfg.api_key_env
                );
                key.clone()
            }
            None => std::env::var(&cfg.api_key_env).map_err(|_| {
                Error::StoreUnavailable(format!(
                    "environment variable '{}' not set",
                    cfg.api_key_env
                ))
            })?,
        };

        let http = Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            table: cfg.table.clone(),
        })
    }

    // ── request helpers ──────────────────────────────────────────────

    /// Decorate a request with the PostgREST auth headers.
    fn decorate(&self, rb: RequestBuilder) -> RequestBuilder {
        rb.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Base URL for the records table.
    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// URL filtered to one record id, optionally with a column selection.
    fn record_url(&self, session_id: &str, select: Option<&str>) -> String {
        match select {
            Some(cols) => format!("{}?id=eq.{}&select={}", self.table_url(), session_id, cols),
            None => format!("{}?id=eq.{}", self.table_url(), session_id),
        }
    }

    /// Send a request and map transport/status failures to `StoreUnavailable`.
    async fn execute(&self, endpoint: &str, rb: RequestBuilder) -> Result<Response> {
        let resp = self
            .decorate(rb)
            .send()
            .await
            .map_err(|e| Error::StoreUnavailable(format!("{endpoint}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::StoreUnavailable(format!(
                "{endpoint} returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        Ok(resp)
    }

    /// Read a response body and parse it as JSON.
    async fn parse_body<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        resp: Response,
    ) -> Result<T> {
        let body = resp
            .text()
            .await
            .map_err(|e| Error::StoreUnavailable(format!("{endpoint}: {e}")))?;
        serde_json::from_str(&body).map_err(|e| {
            Error::StoreUnavailable(format!("{endpoint}: unexpected response shape: {e}"))
        })
    }
}

/// Row shape for `select=messages` fetches.
#[derive(Debug, Deserialize)]
struct MessagesRow {
    #[serde(default)]
    messages: Transcript,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl InterviewStore for RestInterviewStore {
    async fn create_session(&self, topic_id: &str) -> Result<SessionRecord> {
        let url = self.table_url();
        let body = serde_json::json!([{
            "topic_id": topic_id,
            "status": "started",
            "messages": [],
        }]);

        let resp = self
            .execute(
                "POST records",
                self.http
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(&body),
            )
            .await?;

        let mut rows: Vec<SessionRecord> = Self::parse_body("POST records", resp).await?;
        rows.pop()
            .ok_or_else(|| Error::StoreUnavailable("insert returned no record".into()))
    }

    async fn update_messages(&self, session_id: &str, transcript: &Transcript) -> Result<()> {
        let url = self.record_url(session_id, None);
        let body = serde_json::json!({ "messages": transcript });

        self.execute("PATCH messages", self.http.patch(&url).json(&body))
            .await?;
        Ok(())
    }

    async fn fetch_transcript(&self, session_id: &str) -> Result<Transcript> {
        let url = self.record_url(session_id, Some("messages"));

        let resp = self.execute("GET messages", self.http.get(&url)).await?;
        let mut rows: Vec<MessagesRow> = Self::parse_body("GET messages", resp).await?;
        Ok(rows.pop().map(|r| r.messages).unwrap_or_default())
    }

    async fn save_report(&self, session_id: &str, report: &Report) -> Result<()> {
        let url = self.record_url(session_id, None);
        let body = serde_json::json!({
            "report": report,
            "status": "completed",
        });

        self.execute("PATCH report", self.http.patch(&url).json(&body))
            .await?;
        Ok(())
    }

    async fn fetch_session(&self, session_id: &str) -> Result<SessionRecord> {
        let url = self.record_url(session_id, Some("*"));

        let resp = self.execute("GET record", self.http.get(&url)).await?;
        let mut rows: Vec<SessionRecord> = Self::parse_body("GET record", resp).await?;
        rows.pop()
            .ok_or_else(|| Error::StoreUnavailable(format!("session {session_id} not found")))
    }

    async fn list_sessions(&self) -> Result<Vec<SessionRecord>> {
        let url = format!("{}?select=*&order=created_at.desc", self.table_url());

        let resp = self.execute("GET records", self.http.get(&url)).await?;
        Self::parse_body("GET records", resp).await
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestInterviewStore {
        let cfg = StoreConfig {
            url: Some("https://example.supabase.co/".into()),
            api_key: Some("test-key".into()),
            ..Default::default()
        };
        RestInterviewStore::from_config(&cfg).unwrap()
    }

    #[test]
    fn from_config_requires_a_url() {
        let cfg = StoreConfig::default();
        let err = RestInterviewStore::from_config(&cfg).unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
    }

    #[test]
    fn table_url_strips_trailing_slash() {
        let c = client();
        assert_eq!(
            c.table_url(),
            "https://example.supabase.co/rest/v1/interviews"
        );
    }

    #[test]
    fn record_url_filters_by_id() {
        let c = client();
        assert_eq!(
            c.record_url("abc-123", None),
            "https://example.supabase.co/rest/v1/interviews?id=eq.abc-123"
        );
        assert_eq!(
            c.record_url("abc-123", Some("messages")),
            "https://example.supabase.co/rest/v1/interviews?id=eq.abc-123&select=messages"
        );
    }
}
