//! Shared helpers for collaborator adapters.

use parley_domain::config::CollabConfig;
use parley_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Resolve the collaborator API key.
///
/// Precedence:
/// 1. `api_key` field (plaintext — warn)
/// 2. the `api_key_env` environment variable
/// 3. Error
pub(crate) fn resolve_api_key(cfg: &CollabConfig) -> Result<String> {
    if let Some(ref key) = cfg.api_key {
        tracing::warn!(
            "API key loaded from plaintext config field 'api_key' — \
             prefer setting the {} environment variable instead",
            cfg.api_key_env
        );
        return Ok(key.clone());
    }

    std::env::var(&cfg.api_key_env).map_err(|_| {
        Error::Config(format!(
            "environment variable '{}' not set or not valid UTF-8 — \
             required for the collaborator API key",
            cfg.api_key_env
        ))
    })
}
