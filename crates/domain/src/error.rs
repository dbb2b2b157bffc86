/// Shared error type used across all Parley crates.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP: {0}")]
    Http(String),

    #[error("timeout: {0}")]
    Timeout(String),

    #[error("collaborator {provider}: {message}")]
    Collaborator { provider: String, message: String },

    /// The record store is unconfigured or a store call failed. Callers
    /// recover locally: mock ids, skipped persistence, skipped fetch.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// The report response did not match the fixed schema even after
    /// defensive unwrapping. Absorbed into the fallback report.
    #[error("malformed report: {0}")]
    MalformedReport(String),

    /// No transcript resolved at report time. The only hard 4xx.
    #[error("no transcript content to summarize")]
    NoContent,

    #[error("config: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
