//! Classification of failed requests.
//!
//! A failed request becomes exactly one of three outcomes:
//!
//! 1. [`RemoteOutcome::NetworkUnavailable`] when the connectivity probe says
//!    the device is offline. Checked first; the body is ignored.
//! 2. [`RemoteOutcome::SessionExpired`] when the body's `reason` signals an
//!    expired or missing token.
//! 3. [`RemoteOutcome::Failure`] otherwise, carrying `reason`. A body that
//!    does not decode yields an empty reason.

use std::sync::Arc;

use serde::Deserialize;

use super::types::RemoteOutcome;

/// Reason the backend sends when it rejects a session token.
pub const EXPIRED_TOKEN_REASON: &str = "Missing, illegal or expired token";

/// Decides whether a failure happened because the device is offline.
pub trait ConnectivityProbe: Send + Sync {
    /// Returns `false` when the device has no network.
    ///
    /// `error_body` is `None` when the transport produced no response at
    /// all.
    fn is_connected(&self, error_body: Option<&[u8]>) -> bool;
}

/// Treats a failure that returned no bytes as "offline".
#[derive(Debug, Default, Clone, Copy)]
pub struct ResponseBodyProbe;

impl ConnectivityProbe for ResponseBodyProbe {
    fn is_connected(&self, error_body: Option<&[u8]>) -> bool {
        error_body.is_some()
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    reason: String,
}

/// Turns failed responses into [`RemoteOutcome`]s.
#[derive(Clone)]
pub struct ErrorClassifier {
    probe: Arc<dyn ConnectivityProbe>,
}

impl std::fmt::Debug for ErrorClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorClassifier").finish_non_exhaustive()
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(Arc::new(ResponseBodyProbe))
    }
}

impl ErrorClassifier {
    /// Creates a classifier with the given connectivity probe.
    #[must_use]
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { probe }
    }

    /// Classifies a failed response body.
    ///
    /// `error_body` is `None` when the request produced no response.
    #[must_use]
    pub fn classify<T>(&self, error_body: Option<&[u8]>) -> RemoteOutcome<T> {
        if !self.probe.is_connected(error_body) {
            return RemoteOutcome::NetworkUnavailable;
        }

        let reason = error_body
            .and_then(|body| serde_json::from_slice::<ErrorBody>(body).ok())
            .map(|body| body.reason)
            .unwrap_or_default();

        if is_token_expired(&reason) {
            RemoteOutcome::SessionExpired
        } else {
            RemoteOutcome::Failure(reason)
        }
    }
}

/// Returns whether a failure reason means the session token is no longer
/// valid.
#[must_use]
pub fn is_token_expired(reason: &str) -> bool {
    reason == EXPIRED_TOKEN_REASON || reason.to_ascii_lowercase().contains("expired")
}
