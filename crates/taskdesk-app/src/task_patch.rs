//! Partial updates applied by single and bulk edits.

use taskdesk_core::{DueDate, Task};

/// Partial-field update merged into existing tasks.
///
/// `None` leaves a field untouched. Values are not re-validated: an update
/// may set an empty title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Overwrite the title.
    pub title: Option<String>,
    /// Overwrite the description.
    pub body: Option<String>,
    /// Overwrite the due date.
    pub due_date: Option<DueDate>,
    /// Overwrite the completion flag.
    pub completed: Option<bool>,
    /// Reassign the task.
    pub assigned_to: Option<String>,
}

impl TaskPatch {
    /// Empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the due date.
    #[must_use]
    pub fn due_date(mut self, due: impl Into<DueDate>) -> Self {
        self.due_date = Some(due.into());
        self
    }

    /// Set the completion flag.
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Reassign to `user`.
    #[must_use]
    pub fn assign(mut self, user: impl Into<String>) -> Self {
        self.assigned_to = Some(user.into());
        self
    }

    /// Returns true when the patch would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.body.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
            && self.assigned_to.is_none()
    }

    /// Produce a merged copy of `task`. `id` and `comments` are carried over.
    #[must_use]
    pub fn apply(&self, task: &Task) -> Task {
        let mut merged = task.clone();
        if let Some(title) = &self.title {
            merged.title.clone_from(title);
        }
        if let Some(body) = &self.body {
            merged.body.clone_from(body);
        }
        if let Some(due) = &self.due_date {
            merged.due_date.clone_from(due);
        }
        if let Some(completed) = self.completed {
            merged.completed = completed;
        }
        if let Some(user) = &self.assigned_to {
            merged.assigned_to.clone_from(user);
        }
        merged
    }
}
