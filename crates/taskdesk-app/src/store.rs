//! Copy-on-write task collection and the selection it keeps consistent.
//!
//! Every effective mutation publishes a new [`TaskSnapshot`]. Tasks that did
//! not change are shared between versions; changed tasks are rebuilt, so a
//! snapshot held by a caller never observes later writes. Operations that
//! reference unknown ids are silent no-ops and leave the version untouched.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use taskdesk_core::filter;
use taskdesk_core::{Comment, FilterSpec, Task, TaskDraft, TaskId, TaskQuery, ValidationResult};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::seed::{self, SeedResult};
use crate::selection::{Selection, SelectionState};
use crate::task_patch::TaskPatch;

/// Immutable version of the task collection.
#[derive(Debug, Clone, Default)]
pub struct TaskSnapshot {
    tasks: Arc<[Arc<Task>]>,
    version: u64,
}

impl TaskSnapshot {
    /// Monotonic version; bumped by every effective mutation.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Tasks in store order (most recently created first).
    #[must_use]
    pub fn tasks(&self) -> &[Arc<Task>] {
        &self.tasks
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true when the collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<Task>> {
        self.tasks.iter().find(|task| task.id.as_str() == id)
    }

    /// Whether a task with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Tasks passing `query` and `filter`, in store order.
    #[must_use]
    pub fn visible(&self, query: &str, filter: &FilterSpec) -> Vec<Arc<Task>> {
        TaskQuery::new(query, filter).filter(self.tasks.iter().cloned())
    }

    /// Distinct assignees across every task, not only the visible ones.
    #[must_use]
    pub fn available_assignees(&self) -> BTreeSet<String> {
        filter::assignees(self.tasks.iter().map(|task| &**task))
    }

    /// Number of open tasks whose due date lies before `now`.
    #[must_use]
    pub fn overdue_count(&self, now: OffsetDateTime) -> usize {
        self.tasks.iter().filter(|task| task.is_overdue(now)).count()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id.as_str() == id)
    }
}

/// Authoritative in-memory task collection.
#[derive(Debug, Clone)]
pub struct TaskStore {
    current: TaskSnapshot,
    selection: Selection,
    default_assignee: String,
}

impl TaskStore {
    /// Empty store; drafts without an assignee go to `default_assignee`.
    #[must_use]
    pub fn new(default_assignee: impl Into<String>) -> Self {
        Self {
            current: TaskSnapshot::default(),
            selection: Selection::new(),
            default_assignee: default_assignee.into(),
        }
    }

    /// Store initialised from a seed collection, kept in the given order.
    ///
    /// # Errors
    /// Returns [`SeedError::DuplicateTaskId`](crate::SeedError::DuplicateTaskId) when ids collide.
    pub fn with_tasks(tasks: Vec<Task>, default_assignee: impl Into<String>) -> SeedResult<Self> {
        seed::ensure_unique_ids(&tasks)?;
        info!(count = tasks.len(), "Loaded task seed");
        let tasks: Vec<Arc<Task>> = tasks.into_iter().map(Arc::new).collect();
        Ok(Self {
            current: TaskSnapshot {
                tasks: tasks.into(),
                version: 0,
            },
            selection: Selection::new(),
            default_assignee: default_assignee.into(),
        })
    }

    /// Current version of the collection.
    #[must_use]
    pub fn snapshot(&self) -> TaskSnapshot {
        self.current.clone()
    }

    /// Version counter of the current collection.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.current.version
    }

    /// Tasks in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Arc<Task>] {
        self.current.tasks()
    }

    /// Look up a task by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<Task>> {
        self.current.get(id)
    }

    /// Number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns true when the store holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Assignee used for drafts that do not name one.
    #[must_use]
    pub fn default_assignee(&self) -> &str {
        &self.default_assignee
    }

    /// Tasks passing `query` and `filter`.
    #[must_use]
    pub fn visible(&self, query: &str, filter: &FilterSpec) -> Vec<Arc<Task>> {
        self.current.visible(query, filter)
    }

    /// Distinct assignees across every task.
    #[must_use]
    pub fn available_assignees(&self) -> BTreeSet<String> {
        self.current.available_assignees()
    }

    /// Validate `draft` and insert it at the head of the collection.
    ///
    /// # Errors
    /// Returns the draft's [`ValidationError`](taskdesk_core::ValidationError); the store is unchanged.
    pub fn create(&mut self, draft: TaskDraft) -> ValidationResult<Arc<Task>> {
        let id = self.fresh_id();
        let task = Arc::new(draft.into_task(id, &self.default_assignee)?);
        let mut next = Vec::with_capacity(self.len() + 1);
        next.push(Arc::clone(&task));
        next.extend(self.current.tasks.iter().cloned());
        self.commit(next);
        debug!(task = %task.id, "Created task");
        Ok(task)
    }

    /// Merge `patch` into the task with `id`. Returns the resulting task, or
    /// `None` when no such task exists.
    pub fn update(&mut self, id: &str, patch: &TaskPatch) -> Option<Arc<Task>> {
        let Some(index) = self.current.position(id) else {
            debug!(task = id, "Ignoring update for unknown task");
            return None;
        };
        if patch.is_empty() {
            return Some(Arc::clone(&self.current.tasks[index]));
        }
        let updated = Arc::new(patch.apply(&self.current.tasks[index]));
        self.replace_at(index, Arc::clone(&updated));
        debug!(task = id, "Updated task");
        Some(updated)
    }

    /// Remove a task with its comments and deselect it. Returns false when absent.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.current.position(id) else {
            return false;
        };
        let mut next = self.current.tasks.to_vec();
        next.remove(index);
        self.selection.remove(id);
        self.commit(next);
        debug!(task = id, "Deleted task");
        true
    }

    /// Copy each referenced task (first occurrence only, unknown ids skipped)
    /// and insert the copies ahead of the existing tasks in input order.
    pub fn duplicate(&mut self, ids: &[TaskId]) -> Vec<Arc<Task>> {
        let mut seen = HashSet::with_capacity(ids.len());
        let mut copies = Vec::new();
        for id in ids {
            if !seen.insert(id.as_str()) {
                continue;
            }
            if let Some(source) = self.current.get(id.as_str()) {
                copies.push(Arc::new(source.duplicate(self.fresh_id())));
            }
        }
        if copies.is_empty() {
            return copies;
        }
        let mut next = Vec::with_capacity(copies.len() + self.len());
        next.extend(copies.iter().cloned());
        next.extend(self.current.tasks.iter().cloned());
        self.commit(next);
        debug!(count = copies.len(), "Duplicated tasks");
        copies
    }

    /// Merge `patch` into every referenced task. Returns the number updated.
    pub fn bulk_update(&mut self, ids: &[TaskId], patch: &TaskPatch) -> usize {
        if patch.is_empty() {
            return 0;
        }
        let targets: HashSet<&str> = ids.iter().map(TaskId::as_str).collect();
        let mut updated = 0;
        let next: Vec<Arc<Task>> = self
            .current
            .tasks
            .iter()
            .map(|task| {
                if targets.contains(task.id.as_str()) {
                    updated += 1;
                    Arc::new(patch.apply(task))
                } else {
                    Arc::clone(task)
                }
            })
            .collect();
        if updated > 0 {
            self.commit(next);
            debug!(count = updated, "Bulk updated tasks");
        }
        updated
    }

    /// Delete every referenced task and prune the selection. Returns the number removed.
    pub fn bulk_delete(&mut self, ids: &[TaskId]) -> usize {
        let targets: HashSet<&str> = ids.iter().map(TaskId::as_str).collect();
        let (removed, kept): (Vec<Arc<Task>>, Vec<Arc<Task>>) = self
            .current
            .tasks
            .iter()
            .cloned()
            .partition(|task| targets.contains(task.id.as_str()));
        if removed.is_empty() {
            return 0;
        }
        for task in &removed {
            self.selection.remove(task.id.as_str());
        }
        self.commit(kept);
        debug!(count = removed.len(), "Bulk deleted tasks");
        removed.len()
    }

    /// Append `comment` to a task. Returns false when the task does not exist.
    pub fn add_comment(&mut self, task_id: &str, comment: Comment) -> bool {
        let Some(index) = self.current.position(task_id) else {
            debug!(task = task_id, "Ignoring comment for unknown task");
            return false;
        };
        let mut task = Task::clone(&self.current.tasks[index]);
        debug!(task = task_id, comment = %comment.id, reply = comment.is_reply(), "Added comment");
        task.comments.push(comment);
        self.replace_at(index, Arc::new(task));
        true
    }

    /// Replace the text of one comment, keeping every other field.
    /// Returns false when the task or comment does not exist.
    pub fn update_comment(&mut self, task_id: &str, comment_id: &str, text: impl Into<String>) -> bool {
        let Some((index, slot)) = self.comment_position(task_id, comment_id) else {
            return false;
        };
        let mut task = Task::clone(&self.current.tasks[index]);
        task.comments[slot].text = text.into();
        self.replace_at(index, Arc::new(task));
        debug!(task = task_id, comment = comment_id, "Updated comment");
        true
    }

    /// Remove exactly one comment. Replies to it stay and become orphans.
    /// Returns false when the task or comment does not exist.
    pub fn delete_comment(&mut self, task_id: &str, comment_id: &str) -> bool {
        let Some((index, slot)) = self.comment_position(task_id, comment_id) else {
            return false;
        };
        let mut task = Task::clone(&self.current.tasks[index]);
        task.comments.remove(slot);
        self.replace_at(index, Arc::new(task));
        debug!(task = task_id, comment = comment_id, "Deleted comment");
        true
    }

    /// Replace the selection with the given ids, dropping ids with no task.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = TaskId>,
    {
        let current = &self.current;
        self.selection
            .select_all(ids.into_iter().filter(|id| current.contains(id.as_str())));
    }

    /// Select exactly the given visible tasks.
    pub fn select_visible(&mut self, visible: &[Arc<Task>]) {
        self.select_all(visible.iter().map(|task| task.id.clone()));
    }

    /// Empty the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Include or exclude one task. Unknown ids cannot be selected.
    /// Returns true when the selection changed.
    pub fn toggle_selection(&mut self, id: &str, included: bool) -> bool {
        if included && !self.current.contains(id) {
            debug!(task = id, "Ignoring selection of unknown task");
            return false;
        }
        self.selection.toggle(TaskId::from(id), included)
    }

    /// Checkbox state of the selection over `visible`.
    #[must_use]
    pub fn selection_state(&self, visible: &[Arc<Task>]) -> SelectionState {
        self.selection.state_over(visible)
    }

    /// Selected ids in store order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<TaskId> {
        self.current
            .tasks
            .iter()
            .filter(|task| self.selection.contains(task.id.as_str()))
            .map(|task| task.id.clone())
            .collect()
    }

    /// Apply `patch` to every selected task.
    pub fn update_selected(&mut self, patch: &TaskPatch) -> usize {
        let ids = self.selected_ids();
        self.bulk_update(&ids, patch)
    }

    /// Delete every selected task; the selection ends up empty.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selected_ids();
        self.bulk_delete(&ids)
    }

    /// Duplicate every selected task, keeping store order among the copies.
    pub fn duplicate_selected(&mut self) -> Vec<Arc<Task>> {
        let ids = self.selected_ids();
        self.duplicate(&ids)
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if !self.current.contains(id.as_str()) {
                return id;
            }
        }
    }

    fn comment_position(&self, task_id: &str, comment_id: &str) -> Option<(usize, usize)> {
        let index = self.current.position(task_id)?;
        let slot = self.current.tasks[index]
            .comments
            .iter()
            .position(|comment| comment.id.as_str() == comment_id)?;
        Some((index, slot))
    }

    fn replace_at(&mut self, index: usize, task: Arc<Task>) {
        let mut next = self.current.tasks.to_vec();
        next[index] = task;
        self.commit(next);
    }

    fn commit(&mut self, tasks: Vec<Arc<Task>>) {
        self.current = TaskSnapshot {
            tasks: tasks.into(),
            version: self.current.version + 1,
        };
    }
}
