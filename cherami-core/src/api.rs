//! Core interface wiring configuration, session and executor together.

use std::path::Path;

use log::{info, warn};

use crate::config::{ClientConfig, ConfigError};
use crate::error::{CoreError, Result};
use crate::model::{CircleEntry, FeedEntry, JoinRequest, LoginRequest, NewMessage};
use crate::parser;
use crate::remote::{RemoteExecutor, RemoteOutcome, RemoteRequest};
use crate::session::{Session, SessionStore};

const SESSIONS_PATH: &str = "sessions";
const CIRCLES_PATH: &str = "circles";
const MESSAGES_PATH: &str = "messages";
const JOIN_PATH: &str = "join";

/// Main entry point for all Cherami operations.
///
/// Owns the session store and the executor. Every action reads the current
/// session token before sending its request, and clears the session when the
/// backend answers [`RemoteOutcome::SessionExpired`].
///
/// # Examples
///
/// ```no_run
/// use cherami_core::config::ClientConfig;
/// use cherami_core::CheramiCore;
///
/// # async fn demo() -> Result<(), cherami_core::CoreError> {
/// let config = ClientConfig::new("http://10.0.2.2:8228")?.with_data_dir("/tmp/cherami");
/// let core = CheramiCore::open(config)?;
///
/// let circles = core.circles_for("alice").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CheramiCore {
    config: ClientConfig,
    sessions: SessionStore,
    executor: RemoteExecutor,
}

impl CheramiCore {
    /// Opens the core with the session database under `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured, it cannot be
    /// created, the session store cannot be opened, or the HTTP client
    /// cannot be built.
    pub fn open(config: ClientConfig) -> Result<Self> {
        let data_dir = config.data_dir.as_deref().ok_or(ConfigError::MissingDataDir)?;
        std::fs::create_dir_all(data_dir).map_err(|e| {
            CoreError::Io(format!("failed to create `{}`: {e}", data_dir.display()))
        })?;

        let sessions = SessionStore::new(&data_dir.join(crate::config::SESSION_DB_FILE))?;
        let executor = RemoteExecutor::new(&config)?;

        info!(
            "event=core_open module=core status=ok base_url={} timeout_secs={}",
            config.base_url,
            config.timeout.as_secs()
        );

        Ok(Self::from_parts(config, sessions, executor))
    }

    /// Assembles the core from already-built parts.
    #[must_use]
    pub const fn from_parts(
        config: ClientConfig,
        sessions: SessionStore,
        executor: RemoteExecutor,
    ) -> Self {
        Self {
            config,
            sessions,
            executor,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The data directory, if any.
    #[must_use]
    pub fn data_dir(&self) -> Option<&Path> {
        self.config.data_dir.as_deref()
    }

    /// Returns the stored session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be read.
    pub fn session(&self) -> Result<Session> {
        Ok(self.sessions.get()?)
    }

    /// Sends `request` with the current session token attached.
    async fn dispatch(&self, request: &RemoteRequest) -> RemoteOutcome {
        // Blocking store reads; see `SessionStore`.
        let token = match self.sessions.get() {
            Ok(session) => session.token,
            Err(e) => {
                warn!(
                    "event=session_read module=core status=error path={} error={e}",
                    request.path
                );
                None
            }
        };

        let outcome = self.executor.execute(request, token.as_deref()).await;

        if matches!(outcome, RemoteOutcome::SessionExpired) {
            info!("event=session_expired module=core path={}", request.path);
            if let Err(e) = self.sessions.clear() {
                warn!("event=session_clear module=core status=error error={e}");
            }
        }

        outcome
    }

    /// Logs in and stores the issued session.
    ///
    /// Returns the backend's confirmation text on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the success body carries no token or the session
    /// cannot be stored.
    pub async fn login(&self, handle: &str, password: &str) -> Result<RemoteOutcome<String>> {
        let request = RemoteRequest::post_json(
            SESSIONS_PATH,
            &LoginRequest {
                handle: handle.to_string(),
                password: password.to_string(),
            },
        )?;

        let outcome = self
            .dispatch(&request)
            .await
            .try_map(|body| parser::parse_login(&body))?;

        if let RemoteOutcome::Success(login) = &outcome {
            self.sessions.set(&Session::new(login.session.clone(), handle))?;
            info!("event=login module=core status=ok");
        }

        Ok(outcome.map(|login| login.response))
    }

    /// Ends the session on the backend and forgets it locally.
    ///
    /// The local session is cleared whatever the backend answers.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be cleared or the success
    /// body is malformed.
    pub async fn logout(&self) -> Result<RemoteOutcome<String>> {
        let outcome = self.dispatch(&RemoteRequest::delete(SESSIONS_PATH)).await;
        self.sessions.clear()?;
        info!("event=logout module=core status=ok");

        Ok(outcome.try_map(|body| parser::parse_response_text(&body))?)
    }

    /// Lists the circles owned by `handle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the success body is malformed.
    pub async fn circles_for(&self, handle: &str) -> Result<RemoteOutcome<Vec<CircleEntry>>> {
        let request = RemoteRequest::get(CIRCLES_PATH).with_query("user", handle);
        Ok(self
            .dispatch(&request)
            .await
            .try_map(|body| parser::parse::<CircleEntry>(&body))?)
    }

    /// Loads the logged-in user's own feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the success body is malformed.
    pub async fn profile_feed(&self) -> Result<RemoteOutcome<Vec<FeedEntry>>> {
        Ok(self
            .dispatch(&RemoteRequest::get(MESSAGES_PATH))
            .await
            .try_map(|body| parser::parse::<FeedEntry>(&body))?)
    }

    /// Loads the messages written by `author`.
    ///
    /// # Errors
    ///
    /// Returns an error if the success body is malformed.
    pub async fn messages_by(&self, author: &str) -> Result<RemoteOutcome<Vec<FeedEntry>>> {
        let path = format!("{MESSAGES_PATH}/{}", urlencoding::encode(author));
        Ok(self
            .dispatch(&RemoteRequest::get(path))
            .await
            .try_map(|body| parser::parse::<FeedEntry>(&body))?)
    }

    /// Joins the circle `name` owned by `owner`.
    ///
    /// Returns the backend's confirmation text on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be encoded or the success
    /// body is malformed.
    pub async fn join_circle(&self, name: &str, owner: &str) -> Result<RemoteOutcome<String>> {
        let request = RemoteRequest::post_json(
            JOIN_PATH,
            &JoinRequest {
                circle: name.to_string(),
                target: owner.to_string(),
            },
        )?;
        Ok(self
            .dispatch(&request)
            .await
            .try_map(|body| parser::parse_response_text(&body))?)
    }

    /// Posts a new message as the logged-in user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be encoded or the success
    /// body is malformed.
    pub async fn post_message(&self, content: &str) -> Result<RemoteOutcome<String>> {
        let request = RemoteRequest::post_json(
            MESSAGES_PATH,
            &NewMessage {
                content: content.to_string(),
            },
        )?;
        Ok(self
            .dispatch(&request)
            .await
            .try_map(|body| parser::parse_response_text(&body))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_core() -> CheramiCore {
        let config = ClientConfig::default();
        let executor = RemoteExecutor::new(&config).unwrap();
        CheramiCore::from_parts(config, SessionStore::in_memory().unwrap(), executor)
    }

    #[test]
    fn fresh_core_has_no_session() {
        let core = test_core();
        assert!(!core.session().unwrap().is_authenticated());
    }

    #[test]
    fn open_without_data_dir_fails() {
        let err = CheramiCore::open(ClientConfig::default()).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::MissingDataDir)));
    }

    #[test]
    fn open_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested").join("data");
        let core = CheramiCore::open(ClientConfig::default().with_data_dir(&data_dir)).unwrap();

        assert!(data_dir.join(crate::config::SESSION_DB_FILE).exists());
        assert_eq!(core.data_dir(), Some(data_dir.as_path()));
    }

    #[test]
    fn debug_does_not_leak_session() {
        let core = test_core();
        core.sessions.set(&Session::new("s3cr3t", "bob")).unwrap();
        assert!(!format!("{core:?}").contains("s3cr3t"));
    }
}
