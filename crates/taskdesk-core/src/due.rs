//! Tolerant due-date handling.
//!
//! Due dates are stored exactly as supplied. Parsing happens on read so that
//! malformed values never block a write; they surface as [`DueDisplay::Invalid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// Marker rendered for due dates that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid date";
/// Marker rendered for tasks without a due date.
pub const NO_DATE: &str = "No date";

/// Raw due date string attached to a task.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    /// Wrap a raw value without validating it.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when no date was entered. Whitespace counts as a (malformed) value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse as RFC 3339, falling back to a bare `YYYY-MM-DD` date at midnight UTC.
    #[must_use]
    pub fn parse(&self) -> Option<OffsetDateTime> {
        let raw = self.0.trim();
        if raw.is_empty() {
            return None;
        }
        if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
            return Some(parsed.to_offset(UtcOffset::UTC));
        }
        Date::parse(raw, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| date.midnight().assume_utc())
    }

    /// Render the value for display (UTC).
    #[must_use]
    pub fn display(&self) -> DueDisplay {
        if self.is_empty() {
            return DueDisplay::NoDate;
        }
        let Some(parsed) = self.parse() else {
            return DueDisplay::Invalid;
        };
        parsed
            .format(format_description!(
                "[month repr:short] [day padding:none], [year], [hour repr:12]:[minute] [period]"
            ))
            .map_or(DueDisplay::Invalid, DueDisplay::Date)
    }

    /// A task is overdue when its due date lies strictly before `now` and it is not completed.
    ///
    /// Unparseable dates are never overdue.
    #[must_use]
    pub fn is_overdue(&self, now: OffsetDateTime, completed: bool) -> bool {
        !completed && self.parse().is_some_and(|due| due < now)
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DueDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for DueDate {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Read-time rendering of a [`DueDate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DueDisplay {
    /// The task has no due date.
    NoDate,
    /// The stored value could not be parsed.
    Invalid,
    /// Formatted date.
    Date(String),
}

impl DueDisplay {
    /// Returns true for the invalid-date marker.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid)
    }
}

impl fmt::Display for DueDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDate => f.write_str(NO_DATE),
            Self::Invalid => f.write_str(INVALID_DATE),
            Self::Date(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn parses_rfc3339_and_bare_dates() {
        let due = DueDate::new("2024-12-15T14:30:00Z");
        assert_eq!(due.parse(), Some(datetime!(2024-12-15 14:30 UTC)));

        let bare = DueDate::new("2024-01-01");
        assert_eq!(bare.parse(), Some(datetime!(2024-01-01 0:00 UTC)));
    }

    #[test]
    fn offsets_are_normalized_to_utc() {
        let due = DueDate::new("2025-01-01T09:00:00+09:00");
        let parsed = due.parse().unwrap_or_else(|| panic!("must parse"));
        assert_eq!(parsed.offset(), UtcOffset::UTC);
        assert_eq!(parsed, datetime!(2025-01-01 0:00 UTC));
    }

    #[test]
    fn display_formats_valid_dates() {
        let due = DueDate::new("2024-12-15T14:30:00Z");
        assert_eq!(due.display().to_string(), "Dec 15, 2024, 02:30 PM");
    }

    #[test]
    fn malformed_dates_surface_as_invalid_marker() {
        let due = DueDate::new("next tuesday-ish");
        assert!(due.parse().is_none());
        assert!(due.display().is_invalid());
        assert_eq!(due.display().to_string(), INVALID_DATE);
    }

    #[test]
    fn empty_dates_render_as_no_date() {
        assert_eq!(DueDate::new("").display(), DueDisplay::NoDate);
        assert_eq!(DueDate::default().display().to_string(), NO_DATE);
    }

    #[test]
    fn whitespace_dates_render_as_invalid() {
        let blank = DueDate::new("   ");
        assert!(!blank.is_empty());
        assert_eq!(blank.display(), DueDisplay::Invalid);
        assert!(!blank.is_overdue(datetime!(2030-01-01 0:00 UTC), false));
    }

    #[test]
    fn overdue_requires_past_date_and_incomplete_task() {
        let now = datetime!(2024-12-10 12:00 UTC);
        let past = DueDate::new("2024-12-05T18:00:00Z");
        let future = DueDate::new("2024-12-25T23:59:00Z");

        assert!(past.is_overdue(now, false));
        assert!(!past.is_overdue(now, true));
        assert!(!future.is_overdue(now, false));
        assert!(!DueDate::new("garbage").is_overdue(now, false));
    }
}
