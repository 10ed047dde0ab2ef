//! Request and outcome types for remote actions.

use reqwest::Method;
use serde::Serialize;

use super::error::Result;

/// Result of one remote action.
///
/// The executor produces `RemoteOutcome<Vec<u8>>` carrying the raw success
/// body; typed actions map it through the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteOutcome<T = Vec<u8>> {
    /// The backend accepted the request.
    Success(T),
    /// No connectivity; nothing came back.
    NetworkUnavailable,
    /// The backend rejected the session token.
    SessionExpired,
    /// Any other failure, with the backend's reason text (possibly empty).
    Failure(String),
}

impl<T> RemoteOutcome<T> {
    /// Returns whether this is [`RemoteOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the success value, if any.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Maps the success value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteOutcome<U> {
        match self {
            Self::Success(value) => RemoteOutcome::Success(f(value)),
            Self::NetworkUnavailable => RemoteOutcome::NetworkUnavailable,
            Self::SessionExpired => RemoteOutcome::SessionExpired,
            Self::Failure(reason) => RemoteOutcome::Failure(reason),
        }
    }

    /// Maps the success value through a fallible function.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `f`; non-success outcomes never fail.
    pub fn try_map<U, E>(
        self,
        f: impl FnOnce(T) -> std::result::Result<U, E>,
    ) -> std::result::Result<RemoteOutcome<U>, E> {
        Ok(match self {
            Self::Success(value) => RemoteOutcome::Success(f(value)?),
            Self::NetworkUnavailable => RemoteOutcome::NetworkUnavailable,
            Self::SessionExpired => RemoteOutcome::SessionExpired,
            Self::Failure(reason) => RemoteOutcome::Failure(reason),
        })
    }
}

/// A request relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL, without a leading `/`.
    pub path: String,
    /// Query pairs; encoded by the executor.
    pub query: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<Vec<u8>>,
}

impl RemoteRequest {
    /// Creates a body-less request.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Creates a POST request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized.
    pub fn post_json(path: impl Into<String>, body: &impl Serialize) -> Result<Self> {
        let mut request = Self::new(Method::POST, path);
        request.body = Some(serde_json::to_vec(body)?);
        Ok(request)
    }

    /// Adds a query pair.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}
