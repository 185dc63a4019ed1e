//! Search and facet filtering over the task collection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Task;
use crate::text_matcher::TextMatcher;

/// Completion state used by the status facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// Task is done.
    Completed,
    /// Task is still open.
    Incomplete,
}

impl Completion {
    /// Completion state of a task.
    #[must_use]
    pub const fn of(task: &Task) -> Self {
        if task.completed {
            Self::Completed
        } else {
            Self::Incomplete
        }
    }

    /// String form used in filter tokens.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Incomplete => "incomplete",
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token did not name a completion state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid completion state: {token}")]
pub struct ParseCompletionError {
    token: String,
}

impl FromStr for Completion {
    type Err = ParseCompletionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" | "done" => Ok(Self::Completed),
            "incomplete" | "pending" | "open" => Ok(Self::Incomplete),
            _ => Err(ParseCompletionError { token: s.to_owned() }),
        }
    }
}

/// Structured facets narrowing the visible task list.
///
/// An empty facet does not filter. A completion facet holding both states
/// spans the whole domain and does not filter either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Accepted completion states.
    #[serde(default)]
    pub completion: BTreeSet<Completion>,
    /// Accepted assignees.
    #[serde(default)]
    pub assignees: BTreeSet<String>,
}

impl FilterSpec {
    /// Spec that accepts every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a completion state to the status facet.
    #[must_use]
    pub fn with_completion(mut self, completion: Completion) -> Self {
        self.completion.insert(completion);
        self
    }

    /// Add an assignee to the assignee facet.
    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignees.insert(assignee.into());
        self
    }

    /// Returns true when neither facet has entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.completion.is_empty() && self.assignees.is_empty()
    }

    /// Number of selected facet values.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.completion.len() + self.assignees.len()
    }

    /// Status facet check.
    #[must_use]
    pub fn accepts_completion(&self, task: &Task) -> bool {
        let spans_domain = self.completion.contains(&Completion::Completed)
            && self.completion.contains(&Completion::Incomplete);
        self.completion.is_empty() || spans_domain || self.completion.contains(&Completion::of(task))
    }

    /// Assignee facet check.
    #[must_use]
    pub fn accepts_assignee(&self, task: &Task) -> bool {
        self.assignees.is_empty() || self.assignees.contains(&task.assigned_to)
    }
}

/// Whether `task` passes the free-text query and both facets.
#[must_use]
pub fn matches(task: &Task, query: &str, filter: &FilterSpec) -> bool {
    if let Some(matcher) = TextMatcher::new(query)
        && !matcher.matches(task)
    {
        return false;
    }
    filter.accepts_completion(task) && filter.accepts_assignee(task)
}

/// Search query and facets compiled once for a full scan.
#[derive(Debug, Clone)]
pub struct TaskQuery<'a> {
    text: Option<TextMatcher>,
    filter: &'a FilterSpec,
}

impl<'a> TaskQuery<'a> {
    /// Compile `query` alongside `filter`.
    #[must_use]
    pub fn new(query: &str, filter: &'a FilterSpec) -> Self {
        Self {
            text: TextMatcher::new(query),
            filter,
        }
    }

    /// Same decision as [`matches`] without re-lowercasing the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.text.as_ref().is_none_or(|matcher| matcher.matches(task))
            && self.filter.accepts_completion(task)
            && self.filter.accepts_assignee(task)
    }

    /// Keep the matching tasks in their original order.
    pub fn filter<T, I>(&self, tasks: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<Task>,
    {
        tasks
            .into_iter()
            .filter(|task| self.matches(task.as_ref()))
            .collect()
    }
}

/// Distinct assignees across `tasks`.
pub fn assignees<'t, I>(tasks: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'t Task>,
{
    tasks.into_iter().map(|task| task.assigned_to.clone()).collect()
}
