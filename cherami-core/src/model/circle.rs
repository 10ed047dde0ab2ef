//! Circle records.

use serde::{Deserialize, Serialize};

use crate::parser::{Envelope, Record};
use crate::view::{Destination, Row, RowView};

/// A circle as listed on a user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CircleEntry {
    /// Circle name, unique per owner.
    pub name: String,
    /// Handle of the user who owns the circle.
    pub owner: String,
}

impl CircleEntry {
    /// Creates a circle entry.
    #[must_use]
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
        }
    }

    /// Detail screen this circle navigates to when selected.
    #[must_use]
    pub fn destination(&self, join_visible: bool) -> Destination {
        Destination::CircleDetail {
            circle_name: self.name.clone(),
            owner: self.owner.clone(),
            join_visible,
        }
    }
}

impl Record for CircleEntry {
    const ENVELOPE: Envelope = Envelope::DoubleEncoded { field: "results" };
}

impl Row for CircleEntry {
    fn row_view(&self) -> RowView {
        RowView::new(&self.name).with_subtitle(&self.owner)
    }
}

/// Body posted to `join`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Name of the circle to join.
    #[serde(rename = "Circle")]
    pub circle: String,
    /// Owner of that circle.
    #[serde(rename = "Target")]
    pub target: String,
}

impl From<&CircleEntry> for JoinRequest {
    fn from(entry: &CircleEntry) -> Self {
        Self {
            circle: entry.name.clone(),
            target: entry.owner.clone(),
        }
    }
}
