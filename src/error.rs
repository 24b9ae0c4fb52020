//! Error types for loading the directory.
//!
//! There is a single failure kind, [`LoadFailure`]. Its variants only carry
//! diagnostics for the log; the user always sees [`LOAD_FAILURE_MESSAGE`].
use thiserror::Error;

/// Message shown in place of the card grid when the fetch fails.
pub const LOAD_FAILURE_MESSAGE: &str = "Unable to fetch user data. Please try again later.";

/// Reasons the one-shot user fetch can fail.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadFailure {
    /// The endpoint answered with a non-success HTTP status.
    #[error("fetch failed: HTTP status {0}")]
    Status(u16),

    /// Connection, TLS or transport error before a response was read.
    #[error("fetch failed: {0}")]
    Network(String),

    /// The body was not a JSON array of user records.
    #[error("fetch failed: unparseable body: {0}")]
    Decode(String),

    /// The background fetch ended without reporting an outcome.
    #[error("fetch failed: loader worker exited without a result")]
    WorkerLost,
}

impl LoadFailure {
    /// The fixed user-facing text for every failure cause.
    pub fn user_message(&self) -> &'static str {
        LOAD_FAILURE_MESSAGE
    }
}

impl From<reqwest::Error> for LoadFailure {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LoadFailure::Status(status.as_u16()),
            None if err.is_decode() => LoadFailure::Decode(err.to_string()),
            None => LoadFailure::Network(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LoadFailure {
    fn from(err: serde_json::Error) -> Self {
        LoadFailure::Decode(err.to_string())
    }
}
