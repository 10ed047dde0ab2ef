//! Screen controllers.
//!
//! Each screen owns a [`RequestScope`](crate::scope::RequestScope) and starts
//! its requests through it. A request resolves to a [`ScreenUpdate`]: records
//! or text to show, a [`Notice`] to present, or nothing at all. Dropping the
//! screen cancels whatever it still has in flight.

mod circle;
mod login;
mod profile;

use log::warn;

use crate::error::CoreError;
use crate::remote::RemoteOutcome;
use crate::view::{self, ListBinding, Row, RowContainer};

pub use circle::CircleResultScreen;
pub use login::LoginScreen;
pub use profile::{OtherUserProfileScreen, ProfileScreen};

/// User-facing reaction to a failed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Modal asking the user to reconnect.
    ReconnectModal,
    /// Modal asking the user to log in again.
    ReauthenticateModal,
    /// Transient message with the given text.
    Toast(String),
}

impl Notice {
    /// The notice a non-success outcome calls for.
    #[must_use]
    pub fn for_outcome<T>(outcome: &RemoteOutcome<T>) -> Option<Self> {
        match outcome {
            RemoteOutcome::Success(_) => None,
            RemoteOutcome::NetworkUnavailable => Some(Self::ReconnectModal),
            RemoteOutcome::SessionExpired => Some(Self::ReauthenticateModal),
            RemoteOutcome::Failure(reason) => Some(Self::Toast(reason.clone())),
        }
    }
}

/// What a finished request asks its screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenUpdate<T> {
    /// Show the result.
    Ready(T),
    /// Present a notice.
    Notice(Notice),
    /// Leave the screen as it is.
    Unchanged,
}

impl<T> From<RemoteOutcome<T>> for ScreenUpdate<T> {
    fn from(outcome: RemoteOutcome<T>) -> Self {
        match Notice::for_outcome(&outcome) {
            Some(notice) => Self::Notice(notice),
            None => outcome.success().map_or(Self::Unchanged, Self::Ready),
        }
    }
}

impl<T> ScreenUpdate<T> {
    /// Converts the result of a core action.
    ///
    /// Errors are logged and leave the screen unchanged.
    pub fn settle(action: &'static str, result: Result<RemoteOutcome<T>, CoreError>) -> Self {
        match result {
            Ok(outcome) => outcome.into(),
            Err(e) => {
                warn!("event=screen_update module=screen action={action} status=error error={e}");
                Self::Unchanged
            }
        }
    }

    /// Returns the ready value, if any.
    #[must_use]
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the notice, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Notice(notice) => Some(notice),
            _ => None,
        }
    }

    /// Maps the ready value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ScreenUpdate<U> {
        match self {
            Self::Ready(value) => ScreenUpdate::Ready(f(value)),
            Self::Notice(notice) => ScreenUpdate::Notice(notice),
            Self::Unchanged => ScreenUpdate::Unchanged,
        }
    }
}

impl ScreenUpdate<String> {
    /// Turns a confirmation text into a toast.
    #[must_use]
    pub fn into_notice(self) -> Option<Notice> {
        match self {
            Self::Ready(text) => Some(Notice::Toast(text)),
            Self::Notice(notice) => Some(notice),
            Self::Unchanged => None,
        }
    }
}

impl<R: Row> ScreenUpdate<Vec<R>> {
    /// Binds ready records into `container`.
    ///
    /// The container is left alone unless records are ready.
    pub fn bind<C, F>(
        self,
        container: &mut C,
        on_item_selected: F,
    ) -> ScreenUpdate<ListBinding<R, F>>
    where
        C: RowContainer + ?Sized,
        F: FnMut(&R),
    {
        self.map(|records| view::bind(container, records, on_item_selected))
    }
}
