//! Parley gateway — the HTTP boundary and interview runtime.
//!
//! The gateway owns the turn exchange engine and the report generator, and
//! exposes them (plus session creation and the topic catalog) over an axum
//! API. Persistence and the language model are injected collaborators held
//! in [`state::AppState`].

pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod runtime;
pub mod state;
