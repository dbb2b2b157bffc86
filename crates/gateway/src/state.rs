use std::sync::Arc;

use parley_collab::Collaborator;
use parley_domain::config::Config;
use parley_domain::topics::TopicCatalog;
use parley_sessions::SessionLauncher;
use parley_store::StoreHandle;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The language-model collaborator.
    pub collab: Arc<dyn Collaborator>,
    /// Record store handle; `None` = unconfigured (degraded mode: mock
    /// session ids, no persistence).
    pub store: StoreHandle,
    pub sessions: Arc<SessionLauncher>,
    pub topics: Arc<TopicCatalog>,
}
