//! Login screen.

use std::sync::Arc;

use tokio::runtime::Handle;

use super::ScreenUpdate;
use crate::scope::{Completion, RequestScope};
use crate::CheramiCore;

/// Collects credentials and opens a session.
#[derive(Debug)]
pub struct LoginScreen {
    core: Arc<CheramiCore>,
    scope: RequestScope,
}

impl LoginScreen {
    /// Creates the screen; its requests run on `runtime`.
    #[must_use]
    pub const fn new(core: Arc<CheramiCore>, runtime: Handle) -> Self {
        Self {
            core,
            scope: RequestScope::new(runtime),
        }
    }

    /// The scope owning this screen's requests.
    #[must_use]
    pub const fn scope(&self) -> &RequestScope {
        &self.scope
    }

    /// Logs in; on success the session is stored and the backend's
    /// confirmation text is ready.
    pub fn login(&self, handle: &str, password: &str) -> Completion<ScreenUpdate<String>> {
        let core = Arc::clone(&self.core);
        let handle = handle.to_string();
        let password = password.to_string();
        self.scope.spawn(async move {
            ScreenUpdate::settle("login", core.login(&handle, &password).await)
        })
    }
}
