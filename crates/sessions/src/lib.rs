//! Session lifecycle and transcript source resolution.
//!
//! Sessions are identified by an opaque id issued by the record store or,
//! when the store is unavailable, by a locally generated mock id. The
//! `mock-` prefix is load-bearing: every store operation tests it before
//! touching the wire.

pub mod lifecycle;
pub mod resolver;

pub use lifecycle::{SessionHandle, SessionLauncher};
pub use resolver::resolve_transcript;

/// Prefix marking session ids that are not backed by durable storage.
pub const MOCK_ID_PREFIX: &str = "mock-";

/// True when the id was synthesized locally and must short-circuit every
/// store call.
pub fn is_mock_session_id(id: &str) -> bool {
    id.starts_with(MOCK_ID_PREFIX)
}

/// Synthesize a locally unique mock session id.
pub fn mock_session_id() -> String {
    format!("{}{}", MOCK_ID_PREFIX, chrono::Utc::now().timestamp_millis())
}
