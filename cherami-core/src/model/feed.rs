//! Feed records.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::parser::{Envelope, Record};
use crate::view::{Row, RowView};

/// Separator between the date and time parts of a feed timestamp.
pub const TIME_SEPARATOR: char = 'T';

/// A message shown in a profile feed.
///
/// The backend may name the fields `content` and `created`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Message text.
    #[serde(alias = "content")]
    pub body: String,
    /// ISO-8601-like creation time, e.g. `2014-11-02T10:15:00Z`.
    #[serde(alias = "created")]
    pub timestamp: String,
}

impl FeedEntry {
    /// Creates a feed entry.
    #[must_use]
    pub fn new(body: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            timestamp: timestamp.into(),
        }
    }

    /// The timestamp cut at the first [`TIME_SEPARATOR`].
    ///
    /// Timestamps without a separator are returned whole.
    #[must_use]
    pub fn display_date(&self) -> &str {
        self.timestamp
            .split_once(TIME_SEPARATOR)
            .map_or(self.timestamp.as_str(), |(date, _)| date)
    }

    /// The timestamp as a date-time, if it is valid RFC 3339.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.timestamp).ok()
    }
}

impl Record for FeedEntry {
    const ENVELOPE: Envelope = Envelope::Array;
}

impl Row for FeedEntry {
    fn row_view(&self) -> RowView {
        RowView::new(&self.body).with_subtitle(self.display_date())
    }
}

/// Body posted to `messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    /// Message text.
    pub content: String,
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn display_date_truncates_at_separator() {
        let entry = FeedEntry::new("hi", "2014-11-02T10:15:00Z");
        assert_eq!(entry.display_date(), "2014-11-02");
    }

    #[test]
    fn display_date_ignores_later_separators() {
        let entry = FeedEntry::new("hi", "2014-11-02T10:15:00 CET");
        assert_eq!(entry.display_date(), "2014-11-02");
    }

    #[test]
    fn display_date_without_separator() {
        let entry = FeedEntry::new("hi", "yesterday");
        assert_eq!(entry.display_date(), "yesterday");
    }

    #[test]
    fn display_date_of_empty_timestamp() {
        assert_eq!(FeedEntry::new("hi", "").display_date(), "");
    }

    #[test]
    fn created_at_parses_rfc3339() {
        let entry = FeedEntry::new("hi", "2014-11-02T10:15:00-05:00");
        let created = entry.created_at().unwrap();
        assert_eq!(created.year(), 2014);
        assert_eq!(created.hour(), 10);
    }

    #[test]
    fn created_at_rejects_partial_timestamps() {
        assert!(FeedEntry::new("hi", "2014-11-02").created_at().is_none());
    }

    #[test]
    fn accepts_backend_field_names() {
        let entry: FeedEntry =
            serde_json::from_str(r#"{"content":"hello","created":"2014-11-02T10:15:00Z"}"#)
                .unwrap();
        assert_eq!(entry, FeedEntry::new("hello", "2014-11-02T10:15:00Z"));
    }

    #[test]
    fn row_view_shows_date() {
        let row = FeedEntry::new("hello", "2014-11-02T10:15:00Z").row_view();
        assert_eq!(row.title, "hello");
        assert_eq!(row.subtitle.as_deref(), Some("2014-11-02"));
    }
}
