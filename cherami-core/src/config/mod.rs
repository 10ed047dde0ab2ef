//! Client configuration.
//!
//! A [`ClientConfig`] names the backend every remote action talks to, the
//! request timeout, and the directory holding the local session database.
//!
//! Configuration can be built in code, loaded from a TOML file, and then
//! overridden from the environment:
//!
//! ```toml
//! api_url = "https://cherami.example.com/api/"
//! timeout_secs = 15
//! data_dir = "/data/user/0/com.cherami.cherami/files"
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `CHERAMI_API_URL` | `base_url` |
//! | `CHERAMI_TIMEOUT_SECS` | `timeout` |
//! | `CHERAMI_DATA_DIR` | `data_dir` |

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

pub use error::{ConfigError, Result};

/// Backend used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Default timeout for a single remote action.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// File name of the session database inside the data directory.
pub const SESSION_DB_FILE: &str = "cherami.db";

/// Environment variable overriding the backend URL.
pub const ENV_API_URL: &str = "CHERAMI_API_URL";

/// Environment variable overriding the timeout, in whole seconds.
pub const ENV_TIMEOUT_SECS: &str = "CHERAMI_TIMEOUT_SECS";

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "CHERAMI_DATA_DIR";

/// Configuration for talking to the Cherami backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL; always ends with `/` so relative paths join beneath it.
    pub base_url: Url,
    /// Timeout applied to every request.
    pub timeout: Duration,
    /// Directory holding the session database.
    pub data_dir: Option<PathBuf>,
}

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
    data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration for the given backend URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or not http(s).
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Sets the request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if `timeout` is zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.timeout = validate_timeout(timeout)?;
        Ok(self)
    }

    /// Sets the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Parses a configuration from TOML text.
    ///
    /// Missing keys fall back to the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or a value is invalid.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let mut config = Self::default();

        if let Some(url) = file.api_url {
            config.base_url = normalize_base_url(&url)?;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = timeout_from_secs(secs)?;
        }
        config.data_dir = file.data_dir;

        Ok(config)
    }

    /// Loads a configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Applies `CHERAMI_*` environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override holds an invalid value.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if an override holds an invalid value.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(url) = lookup(ENV_API_URL) {
            self.base_url = normalize_base_url(&url)?;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidTimeout(format!("{secs}: {e}")))?;
            self.timeout = timeout_from_secs(secs)?;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = Some(PathBuf::from(dir));
        }

        Ok(self)
    }

    /// Path of the session database, if a data directory is configured.
    #[must_use]
    pub fn session_db_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(SESSION_DB_FILE))
    }
}

fn timeout_from_secs(secs: u64) -> Result<Duration> {
    validate_timeout(Duration::from_secs(secs))
}

/// A zero timeout fails every request before it is sent.
fn validate_timeout(timeout: Duration) -> Result<Duration> {
    if timeout.is_zero() {
        return Err(ConfigError::InvalidTimeout(
            "timeout must be greater than zero".to_string(),
        ));
    }
    Ok(timeout)
}

/// Parses a base URL and makes sure it ends with `/`.
///
/// Without the trailing slash `Url::join` would replace the last path
/// segment instead of appending to it.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };

    let url = Url::parse(&with_slash).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::UnsupportedScheme(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.data_dir.is_none());
        assert!(config.session_db_path().is_none());
    }

    #[test]
    fn new_appends_trailing_slash() {
        let config = ClientConfig::new("https://cherami.example.com/api").unwrap();
        assert_eq!(config.base_url.as_str(), "https://cherami.example.com/api/");
        assert_eq!(
            config.base_url.join("circles").unwrap().as_str(),
            "https://cherami.example.com/api/circles"
        );
    }

    #[test]
    fn new_rejects_garbage() {
        let err = ClientConfig::new("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn new_rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://cherami.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedScheme(s) if s == "ftp"));
    }

    #[test]
    fn builder_sets_fields() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_secs(5))
            .unwrap()
            .with_data_dir("/tmp/cherami");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.session_db_path(),
            Some(PathBuf::from("/tmp/cherami").join(SESSION_DB_FILE))
        );
    }

    #[test]
    fn with_timeout_rejects_zero() {
        let err = ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn with_timeout_accepts_sub_second() {
        let config = ClientConfig::default()
            .with_timeout(Duration::from_millis(250))
            .unwrap();
        assert_eq!(config.timeout, Duration::from_millis(250));
    }

    #[test]
    fn from_toml_str_reads_all_keys() {
        let config = ClientConfig::from_toml_str(
            r#"
            api_url = "http://10.0.2.2:8228"
            timeout_secs = 12
            data_dir = "/data/cherami"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_str(), "http://10.0.2.2:8228/");
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.data_dir, Some(PathBuf::from("/data/cherami")));
    }

    #[test]
    fn from_toml_str_empty_uses_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn from_toml_str_rejects_zero_timeout() {
        let err = ClientConfig::from_toml_str("timeout_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn from_toml_str_rejects_unknown_keys() {
        let err = ClientConfig::from_toml_str("api = \"http://x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn overrides_replace_values() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_URL, "https://override.example.com"),
            (ENV_TIMEOUT_SECS, "7"),
            (ENV_DATA_DIR, "/var/cherami"),
        ]
        .into_iter()
        .collect();

        let config = ClientConfig::default()
            .with_overrides(|key| vars.get(key).map(ToString::to_string))
            .unwrap();

        assert_eq!(config.base_url.as_str(), "https://override.example.com/");
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/cherami")));
    }

    #[test]
    fn overrides_ignore_empty_values() {
        let config = ClientConfig::default()
            .with_overrides(|_| Some("  ".to_string()))
            .unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn overrides_reject_bad_timeout() {
        let err = ClientConfig::default()
            .with_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ClientConfig::load(Path::new("/nonexistent/cherami.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
