use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Record store connection
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Record store base URL. `None` means unconfigured: sessions degrade
    /// to mock identifiers and nothing is persisted.
    #[serde(default)]
    pub url: Option<String>,
    /// Plaintext API key. Prefer `api_key_env`.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable read when `api_key` is unset.
    #[serde(default = "d_store_key_env")]
    pub api_key_env: String,
    /// Table holding interview records.
    #[serde(default = "d_table")]
    pub table: String,
    #[serde(default = "d_8000")]
    pub timeout_ms: u64,
}

impl StoreConfig {
    /// Whether a store backend was configured at all.
    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            api_key_env: d_store_key_env(),
            table: d_table(),
            timeout_ms: 8000,
        }
    }
}

// ── serde default helpers ───────────────────────────────────────────

fn d_store_key_env() -> String {
    "PARLEY_STORE_API_KEY".into()
}
fn d_table() -> String {
    "interviews".into()
}
fn d_8000() -> u64 {
    8000
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_config_default_is_unconfigured() {
        let cfg = StoreConfig::default();
        assert!(!cfg.is_configured());
        assert_eq!(cfg.table, "interviews");
        assert_eq!(cfg.timeout_ms, 8000);
    }

    #[test]
    fn store_config_with_url_is_configured() {
        let toml_str = r#"
            url = "https://example.supabase.co"
        "#;
        let cfg: StoreConfig = toml::from_str(toml_str).unwrap();
        assert!(cfg.is_configured());
        assert_eq!(cfg.api_key_env, "PARLEY_STORE_API_KEY");
    }

    #[test]
    fn store_config_parses_custom_table() {
        let toml_str = r#"
            url = "http://localhost:54321"
            table = "sessions"
            timeout_ms = 2000
        "#;
        let cfg: StoreConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.table, "sessions");
        assert_eq!(cfg.timeout_ms, 2000);
    }
}
