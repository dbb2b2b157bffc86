//! Decides which transcript feeds report generation.
//!
//! Precedence is deterministic and exactly this order: a non-empty
//! client-supplied transcript wins outright (the store write for the last
//! turn may still be in flight, so client state is fresher), then the
//! persisted transcript for a real session id, then `NoContent`.

use parley_domain::error::{Error, Result};
use parley_domain::transcript::Transcript;
use parley_store::StoreHandle;

/// Resolve the canonical transcript for report generation.
///
/// A store fetch failure is logged and treated as "nothing resolved" — the
/// store is best-effort, and `NoContent` is the only error this returns.
pub async fn resolve_transcript(
    client: Option<Transcript>,
    session_id: Option<&str>,
    store: &StoreHandle,
) -> Result<Transcript> {
    // 1. Client-supplied transcript, when non-empty. Deliberately does not
    //    consult the store.
    if let Some(transcript) = client {
        if !transcript.is_empty() {
            return Ok(transcript);
        }
    }

    // 2. Persisted transcript for a real session id.
    if let (Some(id), Some(store)) = (session_id, store.as_ref()) {
        if !crate::is_mock_session_id(id) {
            match store.fetch_transcript(id).await {
                Ok(transcript) if !transcript.is_empty() => return Ok(transcript),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        session_id = id,
                        "transcript fetch failed — treating as unresolved"
                    );
                }
            }
        }
    }

    // 3. Nothing to summarize.
    Err(Error::NoContent)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use parley_domain::report::Report;
    use parley_domain::transcript::Turn;
    use parley_store::types::SessionRecord;
    use parley_store::InterviewStore;

    /// A store double serving a fixed transcript and counting fetches.
    struct CountingStore {
        transcript: Transcript,
        fail: bool,
        fetches: AtomicUsize,
    }

    impl CountingStore {
        fn new(transcript: Transcript) -> Self {
            Self {
                transcript,
                fail: false,
                fetches: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                transcript: Transcript::new(),
                fail: true,
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl InterviewStore for CountingStore {
        async fn create_session(&self, _: &str) -> parley_domain::error::Result<SessionRecord> {
            unreachable!("resolver never creates sessions")
        }

        async fn update_messages(
            &self,
            _: &str,
            _: &Transcript,
        ) -> parley_domain::error::Result<()> {
            unreachable!("resolver never writes")
        }

        async fn fetch_transcript(&self, _: &str) -> parley_domain::error::Result<Transcript> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::StoreUnavailable("fetch refused".into()));
            }
            Ok(self.transcript.clone())
        }

        async fn save_report(&self, _: &str, _: &Report) -> parley_domain::error::Result<()> {
            unreachable!("resolver never writes")
        }

        async fn fetch_session(&self, _: &str) -> parley_domain::error::Result<SessionRecord> {
            unreachable!("resolver only fetches transcripts")
        }

        async fn list_sessions(&self) -> parley_domain::error::Result<Vec<SessionRecord>> {
            unreachable!("resolver only fetches transcripts")
        }
    }

    fn transcript_of(n: usize) -> Transcript {
        let mut t = Transcript::new();
        for i in 0..n {
            if i % 2 == 0 {
                t.push(Turn::assistant(format!("question {i}")));
            } else {
                t.push(Turn::user(format!("answer {i}")));
            }
        }
        t
    }

    #[tokio::test]
    async fn client_transcript_wins_over_persisted() {
        // Client holds 4 turns, store only 3 — the resolver must pick the
        // 4-turn version and never hit the store.
        let store = Arc::new(CountingStore::new(transcript_of(3)));
        let handle: StoreHandle = Some(store.clone());

        let resolved = resolve_transcript(Some(transcript_of(4)), Some("real-id"), &handle)
            .await
            .unwrap();

        assert_eq!(resolved.len(), 4);
        assert_eq!(store.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_client_transcript_falls_back_to_store() {
        let store = Arc::new(CountingStore::new(transcript_of(3)));
        let handle: StoreHandle = Some(store.clone());

        let resolved = resolve_transcript(Some(Transcript::new()), Some("real-id"), &handle)
            .await
            .unwrap();

        assert_eq!(resolved.len(), 3);
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn mock_session_id_never_touches_the_store() {
        let store = Arc::new(CountingStore::new(transcript_of(3)));
        let handle: StoreHandle = Some(store.clone());

        let err = resolve_transcript(None, Some("mock-1712000000"), &handle)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoContent));
        assert_eq!(store.fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn nothing_resolvable_is_no_content() {
        let handle: StoreHandle = None;
        let err = resolve_transcript(None, None, &handle).await.unwrap_err();
        assert!(matches!(err, Error::NoContent));
    }

    #[tokio::test]
    async fn store_fetch_failure_degrades_to_no_content() {
        let store = Arc::new(CountingStore::failing());
        let handle: StoreHandle = Some(store.clone());

        let err = resolve_transcript(None, Some("real-id"), &handle)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoContent));
        assert_eq!(store.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_persisted_transcript_is_no_content() {
        let store = Arc::new(CountingStore::new(Transcript::new()));
        let handle: StoreHandle = Some(store.clone());

        let err = resolve_transcript(None, Some("real-id"), &handle)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::NoContent));
    }
}
