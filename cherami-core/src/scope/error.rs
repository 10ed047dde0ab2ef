//! Error types for scoped requests.

use thiserror::Error;
use tokio::task::JoinError;

/// Why a scoped request produced no result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// The owning scope was dropped or cancelled first.
    #[error("Request cancelled")]
    Cancelled,

    /// The request task panicked.
    #[error("Request task panicked: {0}")]
    Panicked(String),

    /// No tokio runtime is available to run requests on.
    #[error("No async runtime available")]
    NoRuntime,
}

impl From<JoinError> for ScopeError {
    fn from(err: JoinError) -> Self {
        if err.is_cancelled() {
            Self::Cancelled
        } else {
            Self::Panicked(err.to_string())
        }
    }
}
