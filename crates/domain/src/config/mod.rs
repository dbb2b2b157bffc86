mod collab;
mod interview;
mod server;
mod store;

pub use collab::*;
pub use interview::*;
pub use server::*;
pub use store::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collab: CollabConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub interview: InterviewConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut issues = Vec::new();

        if self.collab.timeout_ms == 0 {
            issues.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "collab.timeout_ms".into(),
                message: "must be greater than zero".into(),
            });
        }

        if self.collab.model.is_empty() {
            issues.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "collab.model".into(),
                message: "model name must not be empty".into(),
            });
        }

        if let Some(ref url) = self.store.url {
            if url.is_empty() {
                issues.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "store.url".into(),
                    message: "set a non-empty URL or omit the field entirely".into(),
                });
            } else if !url.starts_with("http://") && !url.starts_with("https://") {
                issues.push(ConfigError {
                    severity: ConfigSeverity::Warning,
                    field: "store.url".into(),
                    message: format!("'{url}' does not look like an HTTP(S) URL"),
                });
            }
        } else {
            issues.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "store.url".into(),
                message: "no store configured — sessions will use mock ids and \
                          nothing will persist"
                    .into(),
            });
        }

        if !(0.0..=2.0).contains(&self.interview.temperature) {
            issues.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "interview.temperature".into(),
                message: "expected a value between 0.0 and 2.0".into(),
            });
        }

        if self.interview.greeting.trim().is_empty() {
            issues.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "interview.greeting".into(),
                message: "empty greeting — clients will seed a blank opening turn".into(),
            });
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates_with_store_warning_only() {
        let issues = Config::default().validate();
        assert!(issues
            .iter()
            .all(|i| i.severity == ConfigSeverity::Warning));
        assert!(issues.iter().any(|i| i.field == "store.url"));
    }

    #[test]
    fn zero_timeout_is_an_error() {
        let mut config = Config::default();
        config.collab.timeout_ms = 0;
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error && i.field == "collab.timeout_ms"));
    }

    #[test]
    fn empty_store_url_is_an_error() {
        let mut config = Config::default();
        config.store.url = Some(String::new());
        let issues = config.validate();
        assert!(issues
            .iter()
            .any(|i| i.severity == ConfigSeverity::Error && i.field == "store.url"));
    }

    #[test]
    fn display_includes_severity_tag() {
        let issue = ConfigError {
            severity: ConfigSeverity::Warning,
            field: "store.url".into(),
            message: "something".into(),
        };
        assert!(issue.to_string().starts_with("[WARN] store.url:"));
    }
}
