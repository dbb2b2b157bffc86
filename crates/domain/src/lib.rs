//! Shared domain types for Parley: the interview transcript model, the
//! report artifact, the error taxonomy, stream events, configuration, and
//! the topic catalog.

pub mod config;
pub mod error;
pub mod report;
pub mod stream;
pub mod topics;
pub mod transcript;
