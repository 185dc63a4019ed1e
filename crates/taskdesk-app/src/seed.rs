//! Seed collections used to initialise a [`TaskStore`](crate::TaskStore).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use taskdesk_core::{Task, TaskId};
use thiserror::Error;

/// Built-in demo dataset.
pub const BUILTIN_SEED: &str = include_str!("../seed/tasks.json");

/// Errors raised while loading a seed collection.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Seed file could not be read.
    #[error("failed to read seed file {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Seed JSON did not match the task shape.
    #[error("failed to parse seed tasks: {0}")]
    Json(#[from] serde_json::Error),
    /// Two tasks share an id.
    #[error("duplicate task id in seed: {0}")]
    DuplicateTaskId(TaskId),
}

/// Result alias for seed loading.
pub type SeedResult<T> = Result<T, SeedError>;

/// Parse the built-in dataset.
///
/// # Errors
/// Fails only if the embedded JSON is malformed.
pub fn builtin() -> SeedResult<Vec<Task>> {
    from_json(BUILTIN_SEED)
}

/// Parse a JSON array of tasks.
///
/// # Errors
/// Returns [`SeedError::Json`] on malformed input and
/// [`SeedError::DuplicateTaskId`] when ids collide.
pub fn from_json(json: &str) -> SeedResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(json)?;
    ensure_unique_ids(&tasks)?;
    Ok(tasks)
}

/// Read and parse a seed file.
///
/// # Errors
/// Returns [`SeedError::Io`] when the file cannot be read, otherwise as [`from_json`].
pub fn from_path(path: impl AsRef<Path>) -> SeedResult<Vec<Task>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_json(&contents)
}

/// Reject collections that reuse a task id.
///
/// # Errors
/// Returns the first repeated id.
pub fn ensure_unique_ids(tasks: &[Task]) -> SeedResult<()> {
    let mut seen = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(SeedError::DuplicateTaskId(task.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_seed_has_eight_unique_tasks() {
        let tasks = builtin().unwrap_or_else(|err| panic!("builtin seed must load: {err}"));
        assert_eq!(tasks.len(), 8);
        assert!(tasks.iter().all(|task| task.comments.len() == 2));
        assert_eq!(tasks[0].title, "Complete project proposal");
    }

    #[test]
    fn builtin_seed_keeps_inconsistent_back_references() {
        let tasks = builtin().unwrap_or_else(|err| panic!("builtin seed must load: {err}"));
        let first = &tasks[0];
        assert_eq!(first.id.as_str(), "1");
        assert!(first.comments.iter().all(|c| c.task_id.as_str() == "9"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": "1", "title": "a", "dueDate": "2024-01-01", "assignedTo": "u1"},
            {"id": "1", "title": "b", "dueDate": "2024-01-02", "assignedTo": "u2"}
        ]"#;
        let err = from_json(json).err().unwrap_or_else(|| panic!("duplicate ids must fail"));
        assert!(matches!(err, SeedError::DuplicateTaskId(id) if id.as_str() == "1"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = from_path("/nonexistent/taskdesk/seed.json")
            .err()
            .unwrap_or_else(|| panic!("missing file must fail"));
        assert!(err.to_string().contains("/nonexistent/taskdesk/seed.json"));
    }
}
