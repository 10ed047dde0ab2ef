//! API bridging layer that exposes cherami-core to Flutter.
//!
//! Every async core call is driven to completion on a runtime owned by
//! [`CheramiApp`]; the Dart side awaits the bridge call itself.

use std::sync::Arc;
use std::time::Duration;

use cherami_core::config::ClientConfig;
use cherami_core::model::{CircleEntry, FeedEntry};
use cherami_core::scope::Completion;
use cherami_core::screen::{
    CircleResultScreen, LoginScreen, Notice, OtherUserProfileScreen, ProfileScreen, ScreenUpdate,
};
use cherami_core::CheramiCore;
use flutter_rust_bridge::frb;
use log::warn;
use tokio::runtime::Runtime;

pub use crate::logging::init_logging;

/// Kind of notice the UI should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Modal asking the user to reconnect.
    Reconnect,
    /// Modal asking the user to log in again.
    Reauthenticate,
    /// Transient message.
    Toast,
}

/// A notice for the UI (FFI-friendly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiNotice {
    /// What to present.
    pub kind: NoticeKind,
    /// Toast text; `None` for modals.
    pub message: Option<String>,
}

impl From<Notice> for UiNotice {
    fn from(notice: Notice) -> Self {
        match notice {
            Notice::ReconnectModal => Self {
                kind: NoticeKind::Reconnect,
                message: None,
            },
            Notice::ReauthenticateModal => Self {
                kind: NoticeKind::Reauthenticate,
                message: None,
            },
            Notice::Toast(text) => Self {
                kind: NoticeKind::Toast,
                message: Some(text),
            },
        }
    }
}

/// One circle row (FFI-friendly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircleItem {
    /// Circle name.
    pub name: String,
    /// Owner handle.
    pub owner: String,
}

impl From<CircleEntry> for CircleItem {
    fn from(entry: CircleEntry) -> Self {
        Self {
            name: entry.name,
            owner: entry.owner,
        }
    }
}

/// One feed row (FFI-friendly).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Message text.
    pub body: String,
    /// Date part of the timestamp.
    pub date: String,
}

impl From<FeedEntry> for FeedItem {
    fn from(entry: FeedEntry) -> Self {
        Self {
            date: entry.display_date().to_string(),
            body: entry.body,
        }
    }
}

/// Result of loading a list of circles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CirclePage {
    /// Rows to show; empty when a notice is set.
    pub items: Vec<CircleItem>,
    /// Notice to present instead of rows.
    pub notice: Option<UiNotice>,
}

/// Result of loading a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedPage {
    /// Rows to show; empty when a notice is set.
    pub items: Vec<FeedItem>,
    /// Notice to present instead of rows.
    pub notice: Option<UiNotice>,
}

fn into_page<R, I>(update: ScreenUpdate<Vec<R>>) -> (Vec<I>, Option<UiNotice>)
where
    I: From<R>,
{
    match update {
        ScreenUpdate::Ready(records) => (records.into_iter().map(I::from).collect(), None),
        ScreenUpdate::Notice(notice) => (Vec::new(), Some(notice.into())),
        ScreenUpdate::Unchanged => (Vec::new(), None),
    }
}

/// Application handle exposed to Flutter.
#[frb(opaque)]
pub struct CheramiApp {
    runtime: Runtime,
    core: Arc<CheramiCore>,
}

impl std::fmt::Debug for CheramiApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheramiApp")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl CheramiApp {
    /// Opens the app against `base_url`, keeping local state in `data_dir`.
    ///
    /// `CHERAMI_*` environment variables override the arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the core or its
    /// runtime cannot be started.
    pub fn open(
        base_url: String,
        data_dir: String,
        timeout_secs: Option<u64>,
    ) -> Result<Self, String> {
        let mut config = ClientConfig::new(&base_url)
            .map_err(|e| e.to_string())?
            .with_data_dir(data_dir);
        if let Some(secs) = timeout_secs {
            config = config
                .with_timeout(Duration::from_secs(secs))
                .map_err(|e| e.to_string())?;
        }
        let config = config.with_env_overrides().map_err(|e| e.to_string())?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .map_err(|e| format!("failed to start runtime: {e}"))?;
        let core = CheramiCore::open(config).map_err(|e| e.to_string())?;

        Ok(Self {
            runtime,
            core: Arc::new(core),
        })
    }

    fn wait<T>(&self, completion: Completion<T>) -> Option<T> {
        match self.runtime.block_on(completion) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("event=request_dropped module=bridge status=error error={e}");
                None
            }
        }
    }

    /// Handle of the logged-in user.
    #[frb(sync)]
    #[must_use]
    pub fn username(&self) -> Option<String> {
        ProfileScreen::new(Arc::clone(&self.core), self.runtime.handle().clone()).username()
    }

    /// Logs in. Returns the notice to present; a toast on success.
    #[must_use]
    pub fn login(&self, handle: String, password: String) -> Option<UiNotice> {
        let screen = LoginScreen::new(Arc::clone(&self.core), self.runtime.handle().clone());
        self.wait(screen.login(&handle, &password))
            .and_then(ScreenUpdate::into_notice)
            .map(UiNotice::from)
    }

    /// Logs out. The local session is gone afterwards.
    #[must_use]
    pub fn logout(&self) -> Option<UiNotice> {
        let screen = ProfileScreen::new(Arc::clone(&self.core), self.runtime.handle().clone());
        self.wait(screen.logout())
            .and_then(ScreenUpdate::into_notice)
            .map(UiNotice::from)
    }

    /// Loads the logged-in user's feed.
    #[must_use]
    pub fn profile_feed(&self) -> FeedPage {
        let screen = ProfileScreen::new(Arc::clone(&self.core), self.runtime.handle().clone());
        let (items, notice) = self
            .wait(screen.load_feed())
            .map_or_else(|| (Vec::new(), None), into_page);
        FeedPage { items, notice }
    }

    /// Posts a message.
    #[must_use]
    pub fn post_message(&self, content: String) -> Option<UiNotice> {
        let screen = ProfileScreen::new(Arc::clone(&self.core), self.runtime.handle().clone());
        self.wait(screen.post_message(&content))
            .and_then(ScreenUpdate::into_notice)
            .map(UiNotice::from)
    }

    /// Loads the circles owned by `handle`.
    #[must_use]
    pub fn circles_for(&self, handle: String) -> CirclePage {
        let screen = OtherUserProfileScreen::new(
            Arc::clone(&self.core),
            self.runtime.handle().clone(),
            handle,
        );
        let (items, notice) = self
            .wait(screen.load_circles())
            .map_or_else(|| (Vec::new(), None), into_page);
        CirclePage { items, notice }
    }

    /// Loads the messages `handle` wrote.
    #[must_use]
    pub fn messages_by(&self, handle: String) -> FeedPage {
        let screen = OtherUserProfileScreen::new(
            Arc::clone(&self.core),
            self.runtime.handle().clone(),
            handle,
        );
        let (items, notice) = self
            .wait(screen.load_messages())
            .map_or_else(|| (Vec::new(), None), into_page);
        FeedPage { items, notice }
    }

    /// Joins a circle. Returns the notice to present.
    #[must_use]
    pub fn join_circle(&self, name: String, owner: String) -> Option<UiNotice> {
        let destination = CircleEntry::new(name, owner).destination(true);
        let screen = CircleResultScreen::from_destination(
            Arc::clone(&self.core),
            self.runtime.handle().clone(),
            destination,
        );
        self.wait(screen.join()).flatten().map(UiNotice::from)
    }
}

/// Route for a tapped circle row, as JSON for the Flutter router.
///
/// # Errors
///
/// Returns an error if the route cannot be serialized.
#[frb(sync)]
pub fn circle_route(item: CircleItem, join_visible: bool) -> Result<String, String> {
    let destination = CircleEntry::new(item.name, item.owner).destination(join_visible);
    serde_json::to_string(&destination).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_conversion() {
        assert_eq!(
            UiNotice::from(Notice::ReconnectModal),
            UiNotice {
                kind: NoticeKind::Reconnect,
                message: None
            }
        );
        assert_eq!(
            UiNotice::from(Notice::Toast("joined".to_string())).message.as_deref(),
            Some("joined")
        );
    }

    #[test]
    fn feed_item_shows_date_only() {
        let item = FeedItem::from(FeedEntry::new("hi", "2014-11-02T10:15:00Z"));
        assert_eq!(item.date, "2014-11-02");
        assert_eq!(item.body, "hi");
    }

    #[test]
    fn page_from_notice_has_no_items() {
        let (items, notice): (Vec<CircleItem>, _) =
            into_page(ScreenUpdate::<Vec<CircleEntry>>::Notice(Notice::ReauthenticateModal));
        assert!(items.is_empty());
        assert_eq!(notice.map(|n| n.kind), Some(NoticeKind::Reauthenticate));
    }

    #[test]
    fn circle_route_is_router_json() {
        let json = circle_route(
            CircleItem {
                name: "Hikers".to_string(),
                owner: "alice".to_string(),
            },
            true,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["screen"], "CircleDetail");
        assert_eq!(value["joinVisible"], true);
    }

    #[test]
    fn open_rejects_bad_base_url() {
        let dir = tempfile::tempdir().unwrap();
        let result = CheramiApp::open(
            "not a url".to_string(),
            dir.path().to_string_lossy().into_owned(),
            None,
        );
        assert!(result.is_err());
    }

    #[test]
    fn open_rejects_zero_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let err = CheramiApp::open(
            "http://127.0.0.1:1/".to_string(),
            dir.path().to_string_lossy().into_owned(),
            Some(0),
        )
        .unwrap_err();
        assert!(err.contains("timeout"), "unexpected error: {err}");
    }

    #[test]
    fn open_creates_session_store() {
        let dir = tempfile::tempdir().unwrap();
        let app = CheramiApp::open(
            "http://127.0.0.1:1/".to_string(),
            dir.path().to_string_lossy().into_owned(),
            Some(1),
        )
        .unwrap();
        assert_eq!(app.username(), None);
    }
}
