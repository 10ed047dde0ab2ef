//! Error types for client configuration.

use thiserror::Error;

/// Error type for configuration loading and validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("Invalid base URL `{url}`: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The base URL uses a scheme other than http or https.
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    /// The request timeout is zero or unparseable.
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    /// No data directory was configured for the session store.
    #[error("No data directory configured")]
    MissingDataDir,

    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {reason}")]
    Read {
        /// Path of the config file.
        path: String,
        /// The underlying I/O failure.
        reason: String,
    },

    /// The configuration file is not valid TOML.
    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_base_url_display() {
        let err = ConfigError::InvalidBaseUrl {
            url: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid base URL `not a url`: relative URL without a base"
        );
    }

    #[test]
    fn unsupported_scheme_display() {
        let err = ConfigError::UnsupportedScheme("ftp".to_string());
        assert_eq!(err.to_string(), "Unsupported URL scheme: ftp");
    }

    #[test]
    fn missing_data_dir_display() {
        assert_eq!(
            ConfigError::MissingDataDir.to_string(),
            "No data directory configured"
        );
    }
}
