//! Session storage.
//!
//! The session is the authentication token issued by the backend at login
//! plus the handle it was issued for. It is read before every remote action,
//! written at login, and cleared at logout or when the backend reports that
//! the token expired.
//!
//! # Storage
//!
//! ```text
//! SessionStore
//!     └── preferences table (SQLite)
//!           namespace = "com.cherami.cherami"
//!           ├── token
//!           └── username
//! ```
//!
//! The store survives process restarts. Values are stored in plain text;
//! the platform's per-app file isolation is the only protection.

mod error;
mod storage;
mod types;

pub use error::{Result, SessionError};
pub use storage::{SessionStore, PREFERENCES_NAMESPACE, TOKEN_KEY, USERNAME_KEY};
pub use types::Session;
