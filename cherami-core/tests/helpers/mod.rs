//! Reusable test helpers for integration tests against a mock backend.
//!
//! Each [`TestBackend`] starts its own wiremock server and opens a core
//! whose session database lives in a fresh temporary directory.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use cherami_core::config::ClientConfig;
use cherami_core::remote::RemoteExecutor;
use cherami_core::session::{Session, SessionStore};
use cherami_core::CheramiCore;
use tempfile::TempDir;
use wiremock::MockServer;

/// A mock backend plus a core pointed at it.
pub struct TestBackend {
    pub server: MockServer,
    pub core: Arc<CheramiCore>,
    pub dir: TempDir,
}

impl TestBackend {
    /// Starts a backend with no stored session.
    pub async fn start() -> Self {
        Self::start_with_timeout(Duration::from_secs(5)).await
    }

    /// Starts a backend whose client gives up after `timeout`.
    pub async fn start_with_timeout(timeout: Duration) -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("should create temp dir");
        let core = Arc::new(open_core(&server, &dir, timeout));
        Self { server, core, dir }
    }

    /// Starts a backend with `token` stored for `username`.
    pub async fn logged_in(token: &str, username: &str) -> Self {
        let backend = Self::start().await;
        backend
            .store()
            .set(&Session::new(token, username))
            .expect("should store session");
        backend
    }

    /// A second handle on the session database.
    pub fn store(&self) -> SessionStore {
        SessionStore::new(&self.dir.path().join("cherami.db")).expect("should open store")
    }
}

/// Opens a core against `server`, storing its session under `dir`.
///
/// The HTTP client ignores system proxies so requests reach the mock.
pub fn open_core(server: &MockServer, dir: &TempDir, timeout: Duration) -> CheramiCore {
    let config = ClientConfig::new(&server.uri())
        .expect("mock uri should be a valid base url")
        .with_timeout(timeout)
        .expect("test timeout should be non-zero")
        .with_data_dir(dir.path());
    let http = reqwest::Client::builder()
        .no_proxy()
        .timeout(timeout)
        .build()
        .expect("should build http client");
    let executor = RemoteExecutor::with_client(http, config.base_url.clone());
    let sessions = SessionStore::new(&dir.path().join("cherami.db")).expect("should open store");
    CheramiCore::from_parts(config, sessions, executor)
}
