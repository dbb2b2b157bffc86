//! Session creation with degraded-mode fallback.
//!
//! A session is always obtainable: when the store is unconfigured or the
//! insert fails, a mock identifier is issued instead. The returned id (real
//! or mock) becomes the routing key for every later turn and report
//! operation.

use parley_store::StoreHandle;

/// The routing key handed back to the client on session creation.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    pub id: String,
    /// True when the id is not backed by durable storage.
    pub mock: bool,
}

/// Creates sessions, degrading to mock identifiers when the store is
/// unconfigured or the insert fails.
pub struct SessionLauncher {
    store: StoreHandle,
}

impl SessionLauncher {
    pub fn new(store: StoreHandle) -> Self {
        Self { store }
    }

    /// Create a session for the topic. Never raises: one of the two
    /// branches always yields a handle.
    pub async fn create(&self, topic_id: &str) -> SessionHandle {
        let Some(store) = self.store.as_ref() else {
            tracing::warn!(topic_id, "store not configured — issuing mock session id");
            return SessionHandle {
                id: crate::mock_session_id(),
                mock: true,
            };
        };

        match store.create_session(topic_id).await {
            Ok(record) => {
                tracing::info!(session_id = %record.id, topic_id, "session created");
                SessionHandle {
                    id: record.id,
                    mock: false,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    topic_id,
                    "session insert failed — issuing mock session id"
                );
                SessionHandle {
                    id: crate::mock_session_id(),
                    mock: true,
                }
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;
    use crate::is_mock_session_id;

    use std::sync::Arc;

    use async_trait::async_trait;
    use parley_domain::error::{Error, Result};
    use parley_domain::report::Report;
    use parley_domain::transcript::Transcript;
    use parley_store::types::{SessionRecord, SessionStatus};
    use parley_store::InterviewStore;

    /// A store double that either succeeds with a fixed id or fails.
    struct FixedStore {
        fail: bool,
    }

    #[async_trait]
    impl InterviewStore for FixedStore {
        async fn create_session(&self, topic_id: &str) -> Result<SessionRecord> {
            if self.fail {
                return Err(Error::StoreUnavailable("insert refused".into()));
            }
            Ok(SessionRecord {
                id: "real-id-42".into(),
                topic_id: topic_id.into(),
                status: SessionStatus::Started,
                messages: Transcript::new(),
                report: None,
                created_at: chrono::Utc::now(),
            })
        }

        async fn update_messages(&self, _: &str, _: &Transcript) -> Result<()> {
            Ok(())
        }

        async fn fetch_transcript(&self, _: &str) -> Result<Transcript> {
            Ok(Transcript::new())
        }

        async fn save_report(&self, _: &str, _: &Report) -> Result<()> {
            Ok(())
        }

        async fn fetch_session(&self, id: &str) -> Result<SessionRecord> {
            Err(Error::StoreUnavailable(format!("session {id} not found")))
        }

        async fn list_sessions(&self) -> Result<Vec<SessionRecord>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn creation_without_store_yields_mock_id() {
        let launcher = SessionLauncher::new(None);
        let handle = launcher.create("event-feedback").await;
        assert!(handle.mock);
        assert!(is_mock_session_id(&handle.id));
        assert!(!handle.id.is_empty());
    }

    #[tokio::test]
    async fn creation_with_failing_store_yields_mock_id() {
        let store: Arc<dyn InterviewStore> = Arc::new(FixedStore { fail: true });
        let launcher = SessionLauncher::new(Some(store));
        let handle = launcher.create("event-feedback").await;
        assert!(handle.mock);
        assert!(is_mock_session_id(&handle.id));
    }

    #[tokio::test]
    async fn creation_with_working_store_returns_real_id() {
        let store: Arc<dyn InterviewStore> = Arc::new(FixedStore { fail: false });
        let launcher = SessionLauncher::new(Some(store));
        let handle = launcher.create("policy-hearing").await;
        assert!(!handle.mock);
        assert_eq!(handle.id, "real-id-42");
        assert!(!is_mock_session_id(&handle.id));
    }
}
