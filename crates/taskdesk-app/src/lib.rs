//! Application layer for taskdesk.
//!
//! This crate owns the stateful engine: the copy-on-write task store and its
//! selection, partial updates, the signed-in session, column visibility,
//! seed loading, and project configuration.

pub mod columns;
pub mod config;
pub mod seed;
pub mod selection;
pub mod session;
pub mod store;
pub mod task_patch;

// Re-exports for convenience
pub use columns::{Column, ColumnId, Columns, ParseColumnError};
pub use config::{
    AssigneeConfig, ColumnConfig, DEFAULT_ASSIGNEE, ProjectConfig, SeedConfig, SessionConfig,
};
pub use seed::{SeedError, SeedResult};
pub use selection::{Selection, SelectionState};
pub use session::{Session, SessionError};
pub use store::{TaskSnapshot, TaskStore};
pub use task_patch::TaskPatch;
