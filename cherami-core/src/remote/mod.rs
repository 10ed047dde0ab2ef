//! Remote actions against the Cherami backend.
//!
//! Every screen talks to the backend the same way:
//!
//! ```text
//! RemoteRequest ──► RemoteExecutor ──► 2xx ──► RemoteOutcome::Success(body)
//!                        │
//!                        └── non-2xx / transport failure
//!                                 │
//!                                 ▼
//!                          ErrorClassifier ──► NetworkUnavailable
//!                                              SessionExpired
//!                                              Failure(reason)
//! ```
//!
//! The caller passes the session token; the executor attaches it verbatim as
//! the `Authorization` header.

mod classifier;
mod error;
mod executor;
mod types;

pub use classifier::{
    is_token_expired, ConnectivityProbe, ErrorClassifier, ResponseBodyProbe, EXPIRED_TOKEN_REASON,
};
pub use error::{RemoteError, Result};
pub use executor::RemoteExecutor;
pub use reqwest::Method;
pub use types::{RemoteOutcome, RemoteRequest};
