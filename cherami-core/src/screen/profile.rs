//! Profile screens: the user's own and someone else's.

use std::sync::Arc;

use log::warn;
use tokio::runtime::Handle;

use super::ScreenUpdate;
use crate::model::{CircleEntry, FeedEntry};
use crate::scope::{Completion, RequestScope};
use crate::view::Destination;
use crate::CheramiCore;

/// The logged-in user's profile and feed.
#[derive(Debug)]
pub struct ProfileScreen {
    core: Arc<CheramiCore>,
    scope: RequestScope,
}

impl ProfileScreen {
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

    /// Handle shown in the header, if someone is logged in.
    #[must_use]
    pub fn username(&self) -> Option<String> {
        match self.core.session() {
            Ok(session) => session.username,
            Err(e) => {
                warn!("event=session_read module=screen screen=profile status=error error={e}");
                None
            }
        }
    }

    /// Loads the user's own feed.
    pub fn load_feed(&self) -> Completion<ScreenUpdate<Vec<FeedEntry>>> {
        let core = Arc::clone(&self.core);
        self.scope.spawn(async move {
            ScreenUpdate::settle("profile_feed", core.profile_feed().await)
        })
    }

    /// Posts a message; the confirmation text is ready on success.
    pub fn post_message(&self, content: &str) -> Completion<ScreenUpdate<String>> {
        let core = Arc::clone(&self.core);
        let content = content.to_string();
        self.scope.spawn(async move {
            ScreenUpdate::settle("post_message", core.post_message(&content).await)
        })
    }

    /// Logs out. The local session is gone once this resolves.
    pub fn logout(&self) -> Completion<ScreenUpdate<String>> {
        let core = Arc::clone(&self.core);
        self.scope
            .spawn(async move { ScreenUpdate::settle("logout", core.logout().await) })
    }
}

/// Another user's profile with their circles.
#[derive(Debug)]
pub struct OtherUserProfileScreen {
    core: Arc<CheramiCore>,
    scope: RequestScope,
    handle: String,
}

impl OtherUserProfileScreen {
    /// Creates the screen for `handle`; its requests run on `runtime`.
    #[must_use]
    pub fn new(core: Arc<CheramiCore>, runtime: Handle, handle: impl Into<String>) -> Self {
        Self {
            core,
            scope: RequestScope::new(runtime),
            handle: handle.into(),
        }
    }

    /// The scope owning this screen's requests.
    #[must_use]
    pub const fn scope(&self) -> &RequestScope {
        &self.scope
    }

    /// The profile's handle.
    #[must_use]
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Loads the circles this user owns.
    pub fn load_circles(&self) -> Completion<ScreenUpdate<Vec<CircleEntry>>> {
        let core = Arc::clone(&self.core);
        let handle = self.handle.clone();
        self.scope.spawn(async move {
            ScreenUpdate::settle("circles_for", core.circles_for(&handle).await)
        })
    }

    /// Loads the messages this user wrote.
    pub fn load_messages(&self) -> Completion<ScreenUpdate<Vec<FeedEntry>>> {
        let core = Arc::clone(&self.core);
        let handle = self.handle.clone();
        self.scope.spawn(async move {
            ScreenUpdate::settle("messages_by", core.messages_by(&handle).await)
        })
    }

    /// Where tapping a circle row leads. Circles of other users can be
    /// joined.
    #[must_use]
    pub fn circle_selected(entry: &CircleEntry) -> Destination {
        entry.destination(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::remote::RemoteExecutor;
    use crate::session::{Session, SessionStore};

    fn offline_core() -> Arc<CheramiCore> {
        let config = ClientConfig::default();
        let executor = RemoteExecutor::new(&config).unwrap();
        Arc::new(CheramiCore::from_parts(
            config,
            SessionStore::in_memory().unwrap(),
            executor,
        ))
    }

    #[tokio::test]
    async fn username_comes_from_session() {
        let screen = ProfileScreen::new(offline_core(), Handle::current());
        assert_eq!(screen.username(), None);

        let store = SessionStore::in_memory().unwrap();
        store.set(&Session::new("abc", "alice")).unwrap();
        let config = ClientConfig::default();
        let executor = RemoteExecutor::new(&config).unwrap();
        let core = Arc::new(CheramiCore::from_parts(config, store, executor));
        let screen = ProfileScreen::new(core, Handle::current());
        assert_eq!(screen.username().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn circle_rows_allow_joining() {
        let screen = OtherUserProfileScreen::new(offline_core(), Handle::current(), "alice");
        assert_eq!(screen.handle(), "alice");

        let dest = OtherUserProfileScreen::circle_selected(&CircleEntry::new("Hikers", "alice"));
        assert_eq!(
            dest,
            Destination::CircleDetail {
                circle_name: "Hikers".to_string(),
                owner: "alice".to_string(),
                join_visible: true,
            }
        );
    }
}
