//! Client for the external interview record store.
//!
//! The store holds one record per interview session (transcript, status,
//! report). It is strictly best-effort from the gateway's point of view:
//! when unconfigured or unreachable, every caller degrades instead of
//! failing the session.

pub mod provider;
pub mod rest;
pub mod types;

pub use provider::InterviewStore;
pub use rest::RestInterviewStore;
pub use types::{SessionRecord, SessionStatus};

/// Shared handle to the record store.
///
/// `None` means unconfigured; every caller short-circuits rather than
/// erroring, so a storeless deployment still runs end to end.
pub type StoreHandle = Option<std::sync::Arc<dyn InterviewStore>>;
