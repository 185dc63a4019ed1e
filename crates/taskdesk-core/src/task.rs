use crate::due::DueDate;
use crate::error::{ValidationError, ValidationResult};
use crate::id::{CommentId, TaskId};
use crate::thread;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Title prefix applied to duplicated tasks.
pub const DUPLICATE_PREFIX: &str = "Copy of ";

/// One unit of work together with its comment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Identifier, fixed at creation.
    pub id: TaskId,
    /// Display title.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub body: String,
    /// Raw due date; parsed on read.
    #[serde(default)]
    pub due_date: DueDate,
    /// Completion flag.
    #[serde(default)]
    pub completed: bool,
    /// Assignee identifier. Not checked against any user list.
    pub assigned_to: String,
    /// Comments in creation order.
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Task {
    /// Copy this task under a fresh id with a prefixed title and no comments.
    #[must_use]
    pub fn duplicate(&self, id: TaskId) -> Self {
        Self {
            id,
            title: format!("{DUPLICATE_PREFIX}{}", self.title),
            body: self.body.clone(),
            due_date: self.due_date.clone(),
            completed: self.completed,
            assigned_to: self.assigned_to.clone(),
            comments: Vec::new(),
        }
    }

    /// Look up a comment by id.
    #[must_use]
    pub fn comment(&self, id: &str) -> Option<&Comment> {
        self.comments.iter().find(|comment| comment.id.as_str() == id)
    }

    /// Number of comments that group as thread roots.
    #[must_use]
    pub fn top_level_comment_count(&self) -> usize {
        thread::top_level_count(&self.comments)
    }

    /// Whether the task is past due and still open.
    #[must_use]
    pub fn is_overdue(&self, now: OffsetDateTime) -> bool {
        self.due_date.is_overdue(now, self.completed)
    }
}

impl AsRef<Self> for Task {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// A message attached to a task, optionally replying to another comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Identifier, unique within the owning task.
    pub id: CommentId,
    /// Back-reference recorded at creation. Informational only: ownership is
    /// structural and seed data is known to disagree with it.
    pub task_id: TaskId,
    /// Author identifier.
    pub user_id: String,
    /// Message body.
    pub text: String,
    /// Creation time in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Comment this one replies to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CommentId>,
}

impl Comment {
    /// Build a top-level comment with a fresh id, stamped with the current time.
    #[must_use]
    pub fn compose(task: &TaskId, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: CommentId::generate(),
            task_id: task.clone(),
            user_id: author.into(),
            text: text.into(),
            timestamp: OffsetDateTime::now_utc(),
            parent_id: None,
        }
    }

    /// Turn the comment into a reply to `parent`.
    #[must_use]
    pub fn reply_to(mut self, parent: CommentId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Returns true when the comment names a parent (which may no longer exist).
    #[must_use]
    pub const fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Fields accepted when creating a task. `id` and `comments` are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title; must contain non-whitespace characters.
    pub title: String,
    /// Description.
    pub body: String,
    /// Due date; required.
    pub due_date: Option<DueDate>,
    /// Initial completion flag.
    pub completed: bool,
    /// Assignee; the store's default assignee is used when absent.
    pub assigned_to: Option<String>,
}

impl TaskDraft {
    /// Start a draft with a title and due date.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: impl Into<DueDate>) -> Self {
        Self {
            title: title.into(),
            due_date: Some(due_date.into()),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the assignee.
    #[must_use]
    pub fn assigned_to(mut self, user: impl Into<String>) -> Self {
        self.assigned_to = Some(user.into());
        self
    }

    /// Set the completion flag.
    #[must_use]
    pub const fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Check the draft without consuming it.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyTitle`] for blank titles and
    /// [`ValidationError::MissingDueDate`] when no due date was given.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.due_date.as_ref().is_none_or(DueDate::is_empty) {
            return Err(ValidationError::MissingDueDate);
        }
        Ok(())
    }

    /// Validate and materialize the draft as a task with no comments.
    ///
    /// # Errors
    /// Propagates [`TaskDraft::validate`] failures.
    pub fn into_task(self, id: TaskId, default_assignee: &str) -> ValidationResult<Task> {
        self.validate()?;
        Ok(Task {
            id,
            title: self.title,
            body: self.body,
            due_date: self.due_date.unwrap_or_default(),
            completed: self.completed,
            assigned_to: self
                .assigned_to
                .unwrap_or_else(|| default_assignee.to_owned()),
            comments: Vec::new(),
        })
    }
}
