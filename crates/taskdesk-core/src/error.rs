//! Error types for task creation.

use thiserror::Error;

/// Result alias for task validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A task draft was rejected; nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title was empty or whitespace-only.
    #[error("task title must not be empty")]
    EmptyTitle,
    /// No due date was supplied.
    #[error("task due date is required")]
    MissingDueDate,
}
