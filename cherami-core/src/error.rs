//! Top-level error type for [`CheramiCore`](crate::CheramiCore).
//!
//! Backend failures are not errors: they come back as a
//! [`RemoteOutcome`](crate::remote::RemoteOutcome). These are the local
//! failures around them.

use thiserror::Error;

use crate::config::ConfigError;
use crate::parser::ParseError;
use crate::remote::RemoteError;
use crate::session::SessionError;

/// Error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration is invalid or incomplete.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The session store failed.
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// A success body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// A request could not be prepared.
    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    /// The data directory could not be created.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = CoreError::from(ConfigError::MissingDataDir);
        assert_eq!(
            err.to_string(),
            "Configuration error: No data directory configured"
        );
    }

    #[test]
    fn parse_error_display() {
        let err = CoreError::from(ParseError::MissingField("results"));
        assert_eq!(
            err.to_string(),
            "Parse error: Missing field `results` in response"
        );
    }

    #[test]
    fn io_error_display() {
        let err = CoreError::Io("permission denied".to_string());
        assert_eq!(err.to_string(), "I/O error: permission denied");
    }
}
