//! Multi-select state consumed by bulk actions.

use std::collections::BTreeSet;
use std::sync::Arc;

use taskdesk_core::{Task, TaskId};

/// Set of task ids chosen for bulk action.
///
/// Holds no existence check of its own; [`TaskStore`](crate::TaskStore) prunes
/// ids as tasks are deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<TaskId>,
}

/// Aggregate state of the selection over the visible tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    /// No visible task is selected.
    None,
    /// Some but not all visible tasks are selected.
    Partial,
    /// Every visible task is selected (and there is at least one).
    All,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection with exactly `ids`.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = TaskId>,
    {
        self.ids = ids.into_iter().collect();
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Add or remove a single id. Returns true when the set changed.
    pub fn toggle(&mut self, id: TaskId, included: bool) -> bool {
        if included {
            self.ids.insert(id)
        } else {
            self.ids.remove(id.as_str())
        }
    }

    /// Drop `id` if present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over selected ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &TaskId> + '_ {
        self.ids.iter()
    }

    /// Checkbox state over `visible`.
    #[must_use]
    pub fn state_over(&self, visible: &[Arc<Task>]) -> SelectionState {
        let selected = visible
            .iter()
            .filter(|task| self.contains(task.id.as_str()))
            .count();
        if selected == 0 {
            SelectionState::None
        } else if selected == visible.len() {
            SelectionState::All
        } else {
            SelectionState::Partial
        }
    }
}
