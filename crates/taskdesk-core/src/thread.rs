//! Two-level grouping of a task's comments.
//!
//! Storage keeps arbitrarily deep reply chains. For grouping, a comment is a
//! thread root when it has no parent, when its parent id does not exist in the
//! same task, or when its parent chain loops without reaching a root. Every
//! other comment is flattened under the root it eventually descends from.

use std::collections::HashMap;

use crate::task::Comment;

/// A top-level comment and every reply grouped beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thread<'a> {
    /// Thread root.
    pub root: &'a Comment,
    /// Descendants of `root` in creation order.
    pub replies: Vec<&'a Comment>,
}

/// Direct replies to `parent`, in creation order. Unknown ids yield an empty list.
#[must_use]
pub fn replies<'a>(comments: &'a [Comment], parent: &str) -> Vec<&'a Comment> {
    comments
        .iter()
        .filter(|comment| comment.parent_id.as_ref().is_some_and(|id| id.as_str() == parent))
        .collect()
}

/// Whether `comment` groups as a thread root within `comments`.
#[must_use]
pub fn is_top_level(comments: &[Comment], comment: &Comment) -> bool {
    let root = root_of(comment, comments.len(), |id| {
        comments.iter().find(|candidate| candidate.id.as_str() == id)
    });
    std::ptr::eq(root, comment)
}

/// Group comments into threads, ordered by the position of each root.
#[must_use]
pub fn threads(comments: &[Comment]) -> Vec<Thread<'_>> {
    let index = index_by_id(comments);
    let mut threads: Vec<Thread<'_>> = Vec::new();
    let mut slot_of_root: HashMap<*const Comment, usize> = HashMap::new();
    let mut pending: Vec<(&Comment, &Comment)> = Vec::new();

    for comment in comments {
        let root = root_of(comment, index.len(), |id| index.get(id).copied());
        if std::ptr::eq(root, comment) {
            slot_of_root.insert(std::ptr::from_ref(comment), threads.len());
            threads.push(Thread {
                root: comment,
                replies: Vec::new(),
            });
        } else {
            pending.push((root, comment));
        }
    }

    // Replies may precede their root in storage order, so attach them afterwards.
    for (root, reply) in pending {
        if let Some(&slot) = slot_of_root.get(&std::ptr::from_ref(root)) {
            threads[slot].replies.push(reply);
        }
    }
    threads
}

/// Number of thread roots.
#[must_use]
pub fn top_level_count(comments: &[Comment]) -> usize {
    let index = index_by_id(comments);
    comments
        .iter()
        .filter(|comment| {
            let root = root_of(comment, index.len(), |id| index.get(id).copied());
            std::ptr::eq(root, *comment)
        })
        .count()
}

fn index_by_id(comments: &[Comment]) -> HashMap<&str, &Comment> {
    let mut index = HashMap::with_capacity(comments.len());
    for comment in comments {
        index.entry(comment.id.as_str()).or_insert(comment);
    }
    index
}

/// Walks parent links from `start`. A walk longer than `max_depth` links has
/// revisited a comment, so `start` is its own root.
fn root_of<'a, F>(start: &'a Comment, max_depth: usize, parent: F) -> &'a Comment
where
    F: Fn(&str) -> Option<&'a Comment>,
{
    let mut current = start;
    for _ in 0..=max_depth {
        let Some(next) = current.parent_id.as_ref().and_then(|id| parent(id.as_str())) else {
            return current;
        };
        current = next;
    }
    start
}
