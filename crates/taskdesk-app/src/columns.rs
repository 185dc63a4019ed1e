//! Table column visibility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task field shown as a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnId {
    /// Task title.
    Title,
    /// Description.
    Body,
    /// Due date.
    DueDate,
    /// Completion status.
    Completed,
    /// Assignee.
    AssignedTo,
}

impl ColumnId {
    /// Every column in display order.
    pub const ALL: [Self; 5] = [
        Self::Title,
        Self::Body,
        Self::DueDate,
        Self::Completed,
        Self::AssignedTo,
    ];

    /// Field name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Body => "body",
            Self::DueDate => "dueDate",
            Self::Completed => "completed",
            Self::AssignedTo => "assignedTo",
        }
    }

    /// Header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Body => "Description",
            Self::DueDate => "Due Date",
            Self::Completed => "Status",
            Self::AssignedTo => "Assigned To",
        }
    }

    /// Required columns can never be hidden.
    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Title | Self::DueDate | Self::Completed)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token did not name a column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column: {token}")]
pub struct ParseColumnError {
    token: String,
}

impl FromStr for ColumnId {
    type Err = ParseColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseColumnError { token: s.to_owned() })
    }
}

/// One table column and its visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Field shown in the column.
    pub id: ColumnId,
    /// Header label.
    pub label: &'static str,
    /// Whether the column is shown.
    pub visible: bool,
    /// Whether the column may be hidden.
    pub required: bool,
}

impl Column {
    const fn new(id: ColumnId) -> Self {
        Self {
            id,
            label: id.label(),
            visible: true,
            required: id.is_required(),
        }
    }
}

/// Ordered column set. Starts with every column visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    columns: Vec<Column>,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            columns: ColumnId::ALL.into_iter().map(Column::new).collect(),
        }
    }
}

impl Columns {
    /// Default set with `hidden` columns turned off. Required columns stay visible.
    #[must_use]
    pub fn with_hidden<'a, I>(hidden: I) -> Self
    where
        I: IntoIterator<Item = &'a ColumnId>,
    {
        let mut columns = Self::default();
        for &id in hidden {
            columns.hide(id);
        }
        columns
    }

    /// Flip visibility of `id`. Returns false for required columns.
    pub fn toggle(&mut self, id: ColumnId) -> bool {
        self.set_visible(id, !self.is_visible(id))
    }

    /// Hide `id`. Returns true when it was visible and may be hidden.
    pub fn hide(&mut self, id: ColumnId) -> bool {
        self.set_visible(id, false)
    }

    /// Show `id`. Returns true when it was hidden.
    pub fn show(&mut self, id: ColumnId) -> bool {
        self.set_visible(id, true)
    }

    /// Whether `id` is shown.
    #[must_use]
    pub fn is_visible(&self, id: ColumnId) -> bool {
        self.columns.iter().any(|column| column.id == id && column.visible)
    }

    /// All columns in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter()
    }

    /// Shown columns in display order.
    pub fn visible(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.visible)
    }

    /// Number of shown columns.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    fn set_visible(&mut self, id: ColumnId, visible: bool) -> bool {
        let Some(column) = self.columns.iter_mut().find(|column| column.id == id) else {
            return false;
        };
        if column.visible == visible || (column.required && !visible) {
            return false;
        }
        column.visible = visible;
        true
    }
}
