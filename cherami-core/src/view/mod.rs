//! Binding records into list displays.
//!
//! The shell owns the actual list widget. It implements [`RowContainer`];
//! [`bind`] fills it with one [`RowView`] per record and returns a
//! [`ListBinding`] that routes row selection back to a callback, usually one
//! that navigates to a [`Destination`].

mod error;

use serde::Serialize;

pub use error::{Result, ViewError};

/// Text of one list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    /// Primary line.
    pub title: String,
    /// Secondary line, if any.
    pub subtitle: Option<String>,
}

impl RowView {
    /// Creates a row with a title only.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
        }
    }

    /// Sets the secondary line.
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }
}

/// A record that can be shown as a list row.
pub trait Row {
    /// Renders the record.
    fn row_view(&self) -> RowView;
}

/// A list display rows are rendered into.
pub trait RowContainer {
    /// Removes all rows.
    fn clear_rows(&mut self);

    /// Appends one row.
    fn push_row(&mut self, row: RowView);
}

impl RowContainer for Vec<RowView> {
    fn clear_rows(&mut self) {
        self.clear();
    }

    fn push_row(&mut self, row: RowView) {
        self.push(row);
    }
}

/// Screen a row selection navigates to.
///
/// Serializes as `{"screen": "CircleDetail", "circleName": ..., ...}` for the
/// shell's router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen")]
pub enum Destination {
    /// Circle detail with an optional join button.
    #[serde(rename_all = "camelCase")]
    CircleDetail {
        /// Circle name.
        circle_name: String,
        /// Circle owner.
        owner: String,
        /// Whether the join button is shown.
        join_visible: bool,
    },
}

/// Records bound to a container, with their selection handler.
pub struct ListBinding<R, F> {
    records: Vec<R>,
    on_item_selected: F,
}

impl<R: std::fmt::Debug, F> std::fmt::Debug for ListBinding<R, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListBinding")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl<R, F: FnMut(&R)> ListBinding<R, F> {
    /// Number of bound rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns whether nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The bound records, in row order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Handles a tap on row `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::RowOutOfRange`] if no such row is bound; the
    /// handler is not called.
    pub fn select(&mut self, index: usize) -> Result<()> {
        let record = self.records.get(index).ok_or(ViewError::RowOutOfRange {
            index,
            len: self.records.len(),
        })?;
        (self.on_item_selected)(record);
        Ok(())
    }
}

/// Renders `records` into `container` and wires row selection.
///
/// Existing rows are cleared first.
pub fn bind<R, C, F>(container: &mut C, records: Vec<R>, on_item_selected: F) -> ListBinding<R, F>
where
    R: Row,
    C: RowContainer + ?Sized,
    F: FnMut(&R),
{
    container.clear_rows();
    for record in &records {
        container.push_row(record.row_view());
    }
    ListBinding {
        records,
        on_item_selected,
    }
}
