//! Error types for session storage.

use thiserror::Error;

/// Error type for session store operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database error from `SQLite`.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_display() {
        let err = SessionError::Storage("lock poisoned".to_string());
        assert_eq!(err.to_string(), "Storage error: lock poisoned");
    }

    #[test]
    fn database_error_from_rusqlite() {
        let err: SessionError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(err.to_string().starts_with("Database error:"));
    }
}
