//! Domain types, search and filtering, and comment threading for taskdesk.

/// Tolerant due-date parsing and rendering.
pub mod due;
/// Validation errors.
pub mod error;
/// Facet filtering and the search predicate.
pub mod filter;
/// Identifier types.
pub mod id;
/// Task and comment records.
pub mod task;
/// Case-insensitive text search.
pub mod text_matcher;
/// Comment threading.
pub mod thread;

pub use due::{DueDate, DueDisplay};
pub use error::{ValidationError, ValidationResult};
pub use filter::{Completion, FilterSpec, TaskQuery, matches};
pub use id::{CommentId, TaskId};
pub use task::{Comment, DUPLICATE_PREFIX, Task, TaskDraft};
pub use text_matcher::TextMatcher;
pub use thread::Thread;
