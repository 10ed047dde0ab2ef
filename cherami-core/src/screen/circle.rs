//! Circle detail screen.

use std::sync::Arc;

use tokio::runtime::Handle;

use super::{Notice, ScreenUpdate};
use crate::scope::{Completion, RequestScope};
use crate::view::Destination;
use crate::CheramiCore;

/// Detail of one circle, with an optional join action.
#[derive(Debug)]
pub struct CircleResultScreen {
    core: Arc<CheramiCore>,
    scope: RequestScope,
    circle_name: String,
    owner: String,
    join_visible: bool,
}

impl CircleResultScreen {
    /// Opens the screen a row selection navigated to.
    #[must_use]
    pub fn from_destination(
        core: Arc<CheramiCore>,
        runtime: Handle,
        destination: Destination,
    ) -> Self {
        let Destination::CircleDetail {
            circle_name,
            owner,
            join_visible,
        } = destination;
        Self {
            core,
            scope: RequestScope::new(runtime),
            circle_name,
            owner,
            join_visible,
        }
    }

    /// The scope owning this screen's requests.
    #[must_use]
    pub const fn scope(&self) -> &RequestScope {
        &self.scope
    }

    /// Circle name shown as the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.circle_name
    }

    /// The circle's owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Whether the join button is shown.
    #[must_use]
    pub const fn join_visible(&self) -> bool {
        self.join_visible
    }

    /// Joins the circle.
    ///
    /// Resolves to the notice to present: a toast with the backend's text
    /// on success, or the failure notice. `None` means nothing is shown.
    pub fn join(&self) -> Completion<Option<Notice>> {
        let core = Arc::clone(&self.core);
        let name = self.circle_name.clone();
        let owner = self.owner.clone();
        self.scope.spawn(async move {
            ScreenUpdate::settle("join_circle", core.join_circle(&name, &owner).await).into_notice()
        })
    }
}
