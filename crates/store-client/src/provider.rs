//! The `InterviewStore` trait defines the interface for record store
//! backends (REST, test doubles).

use async_trait::async_trait;

use parley_domain::error::Result;
use parley_domain::report::Report;
use parley_domain::transcript::Transcript;

use crate::types::SessionRecord;

/// Abstraction over the interview record store.
///
/// Every method is a single attempt: failures map to
/// `Error::StoreUnavailable` and callers degrade rather than retry.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    /// Insert a new session record with an empty transcript and
    /// `status = started`. Returns the store-assigned record.
    async fn create_session(&self, topic_id: &str) -> Result<SessionRecord>;

    /// Overwrite the session's `messages` field with the full transcript.
    /// Last write wins; there is no merge.
    async fn update_messages(&self, session_id: &str, transcript: &Transcript) -> Result<()>;

    /// Fetch only the persisted transcript of a session. An existing record
    /// with no messages (or no record at all) yields an empty transcript.
    async fn fetch_transcript(&self, session_id: &str) -> Result<Transcript>;

    /// Attach the report and flip the record to `completed`. Overwrites any
    /// previous report.
    async fn save_report(&self, session_id: &str, report: &Report) -> Result<()>;

    /// Fetch one full session record.
    async fn fetch_session(&self, session_id: &str) -> Result<SessionRecord>;

    /// List all session records, newest first.
    async fn list_sessions(&self) -> Result<Vec<SessionRecord>>;
}
