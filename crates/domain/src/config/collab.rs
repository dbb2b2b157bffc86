use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Collaborator (language model) connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollabConfig {
    /// Gemini API base URL.
    #[serde(default = "d_gemini_url")]
    pub base_url: String,
    /// Model used for both turn streaming and report extraction.
    #[serde(default = "d_model")]
    pub model: String,
    /// Plaintext API key. Prefer `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable read when `api_key` is unset.
    #[serde(default = "d_key_env")]
    pub api_key_env: String,
    /// Hard upper bound on a single collaborator call.
    #[serde(default = "d_30000")]
    pub timeout_ms: u64,
}

impl Default for CollabConfig {
    fn default() -> Self {
        Self {
            base_url: d_gemini_url(),
            model: d_model(),
            api_key: None,
            api_key_env: d_key_env(),
            timeout_ms: 30_000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_gemini_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn d_model() -> String {
    "gemini-1.5-flash".into()
}
fn d_key_env() -> String {
    "PARLEY_GEMINI_API_KEY".into()
}
fn d_30000() -> u64 {
    30_000
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
