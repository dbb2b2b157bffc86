//! Builds the shared [`AppState`] from configuration.

use std::sync::Arc;

use anyhow::Context;

use parley_collab::GeminiCollaborator;
use parley_domain::config::Config;
use parley_domain::topics::TopicCatalog;
use parley_sessions::SessionLauncher;
use parley_store::{InterviewStore, RestInterviewStore, StoreHandle};

use crate::state::AppState;

/// Construct every shared service from the resolved config.
///
/// The collaborator is required — a missing API key is a startup error.
/// The store is optional: absence puts the gateway in degraded mode where
/// sessions get mock ids and nothing persists, which is the expected
/// local-dev experience.
pub fn build_app_state(config: Arc<Config>) -> anyhow::Result<AppState> {
    let collab = GeminiCollaborator::from_config(&config.collab)
        .context("initializing the Gemini collaborator")?;

    let store: StoreHandle = if config.store.is_configured() {
        match RestInterviewStore::from_config(&config.store) {
            Ok(client) => {
                tracing::info!(
                    url = config.store.url.as_deref().unwrap_or_default(),
                    table = %config.store.table,
                    "record store configured"
                );
                Some(Arc::new(client) as Arc<dyn InterviewStore>)
            }
            Err(e) => {
                tracing::warn!(error = %e, "store configuration unusable — running without persistence");
                None
            }
        }
    } else {
        tracing::warn!(
            "no [store] url configured — sessions will use mock ids and nothing will persist"
        );
        None
    };

    let sessions = Arc::new(SessionLauncher::new(store.clone()));
    let topics = Arc::new(TopicCatalog::with_extras(&config.interview.topics));

    Ok(AppState {
        config,
        collab: Arc::new(collab),
        store,
        sessions,
        topics,
    })
}
