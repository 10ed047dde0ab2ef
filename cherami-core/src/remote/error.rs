//! Error types for building remote actions.
//!
//! Failures of a dispatched request never show up here; they are classified
//! into a [`RemoteOutcome`](super::RemoteOutcome) instead.

use thiserror::Error;

/// Error type for preparing requests and the HTTP client.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// A request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type alias for remote action setup.
pub type Result<T> = std::result::Result<T, RemoteError>;
