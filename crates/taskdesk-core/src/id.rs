use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use uuid::Uuid;

/// Identifier of a task.
///
/// Seeded tasks carry arbitrary strings (`"1"`, `"42"`); tasks created at
/// runtime get a `task_`-prefixed UUID v7.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Wrap an existing identifier string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh task identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("task_{}", Uuid::now_v7().simple()))
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for TaskId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identifier of a comment, unique within its task.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Wrap an existing identifier string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh comment identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("comment_{}", Uuid::now_v7().simple()))
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommentId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for CommentId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl Borrow<str> for CommentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_task_ids_use_uuid_v7() {
        let id = TaskId::generate();
        let raw = id
            .as_str()
            .strip_prefix("task_")
            .unwrap_or_else(|| panic!("missing prefix: {id}"));
        let uuid = Uuid::parse_str(raw).unwrap_or_else(|err| panic!("must parse uuid: {err}"));
        assert_eq!(uuid.get_version_num(), 7);
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TaskId::generate(), TaskId::generate());
        assert_ne!(CommentId::generate(), CommentId::generate());
    }

    #[test]
    fn seeded_ids_roundtrip_through_json() {
        let id: CommentId = serde_json::from_str("\"comment_1\"")
            .unwrap_or_else(|err| panic!("must parse comment id: {err}"));
        assert_eq!(id.as_str(), "comment_1");
        let json = serde_json::to_string(&TaskId::from("7"))
            .unwrap_or_else(|err| panic!("must serialize task id: {err}"));
        assert_eq!(json, "\"7\"");
    }
}
