use std::collections::BTreeSet;
use std::sync::Arc;

use taskdesk_app::{AssigneeConfig, ColumnId, Columns, Session, TaskSnapshot};
use taskdesk_core::{Comment, Completion, Task, thread};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn task_table(
    tasks: &[Arc<Task>],
    columns: &Columns,
    assignees: &AssigneeConfig,
    now: OffsetDateTime,
) -> String {
    let mut header = vec!["ID"];
    header.extend(columns.visible().map(|column| column.label));
    header.push("Comments");

    let mut lines = vec![
        header.join(" | "),
        header
            .iter()
            .map(|label| "-".repeat(label.len()))
            .collect::<Vec<_>>()
            .join(" | "),
    ];
    for task in tasks {
        let mut cells = vec![task.id.to_string()];
        cells.extend(
            columns
                .visible()
                .map(|column| cell(task, column.id, assignees, now)),
        );
        cells.push(format!(
            "{}/{}",
            task.top_level_comment_count(),
            task.comments.len()
        ));
        lines.push(cells.join(" | "));
    }
    finish(&lines)
}

/// Footer counting shown tasks against the whole store.
pub fn list_summary(shown: usize, snapshot: &TaskSnapshot, now: OffsetDateTime) -> String {
    format!(
        "\n{shown} of {} tasks shown, {} overdue\n",
        snapshot.len(),
        snapshot.overdue_count(now)
    )
}

fn cell(task: &Task, column: ColumnId, assignees: &AssigneeConfig, now: OffsetDateTime) -> String {
    match column {
        ColumnId::Title => task.title.clone(),
        ColumnId::Body if task.body.is_empty() => "-".to_owned(),
        ColumnId::Body => task.body.clone(),
        ColumnId::DueDate if task.is_overdue(now) => format!("{} (overdue)", task.due_date.display()),
        ColumnId::DueDate => task.due_date.display().to_string(),
        ColumnId::Completed => Completion::of(task).to_string(),
        ColumnId::AssignedTo => assignees.display_name(&task.assigned_to).to_owned(),
    }
}

pub fn task_detail(task: &Task, assignees: &AssigneeConfig, session: &Session) -> String {
    let mut lines = vec![
        format!("Task {}: {}", task.id, task.title),
        format!("Status: {}", Completion::of(task)),
        format!("Due: {}", task.due_date.display()),
        format!("Assigned to: {}", assignees.display_name(&task.assigned_to)),
    ];
    if !task.body.is_empty() {
        lines.push(format!("Description: {}", task.body));
    }

    let threads = thread::threads(&task.comments);
    lines.push(String::new());
    if threads.is_empty() {
        lines.push("No comments".to_owned());
        return finish(&lines);
    }
    lines.push(format!(
        "Comments ({} threads, {} total):",
        threads.len(),
        task.comments.len()
    ));
    for thread in threads {
        lines.push(format!("- {}", comment_line(thread.root, assignees, session)));
        for reply in thread.replies {
            lines.push(format!("    > {}", comment_line(reply, assignees, session)));
        }
    }
    finish(&lines)
}

fn comment_line(comment: &Comment, assignees: &AssigneeConfig, session: &Session) -> String {
    let timestamp = comment
        .timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| comment.timestamp.to_string());
    let mine = if session.owns(comment) { " (you)" } else { "" };
    format!(
        "[{}] {}{mine}, {timestamp}: {}",
        comment.id,
        assignees.display_name(&comment.user_id),
        comment.text
    )
}

pub fn assignee_list(users: &BTreeSet<String>, assignees: &AssigneeConfig) -> String {
    if users.is_empty() {
        return "No assignees\n".to_owned();
    }
    let lines: Vec<String> = users
        .iter()
        .map(|user| match assignees.display_name(user) {
            name if name == user.as_str() => user.clone(),
            name => format!("{user} ({name})"),
        })
        .collect();
    finish(&lines)
}

pub fn column_list(columns: &Columns) -> String {
    let lines: Vec<String> = columns
        .iter()
        .map(|column| {
            let state = if column.visible { "shown" } else { "hidden" };
            let required = if column.required { ", required" } else { "" };
            format!("{} ({}): {state}{required}", column.label, column.id)
        })
        .collect();
    finish(&lines)
}

fn finish(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdesk_app::{TaskStore, seed};
    use taskdesk_core::{CommentId, DueDate, TaskId};
    use time::macros::datetime;

    fn seed_task(id: &str) -> Task {
        seed::builtin()
            .unwrap_or_else(|err| panic!("seed: {err}"))
            .into_iter()
            .find(|task| task.id.as_str() == id)
            .unwrap_or_else(|| panic!("seed task {id}"))
    }

    #[test]
    fn detail_groups_replies_under_roots() {
        let task = seed_task("1");
        let session =
            Session::authenticated("jane_smith").unwrap_or_else(|err| panic!("session: {err}"));
        let output = task_detail(&task, &AssigneeConfig::default(), &session);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Task 1: Complete project proposal");
        assert_eq!(lines[2], "Due: Dec 15, 2024, 02:30 PM");
        assert!(output.contains("Comments (1 threads, 2 total):"));
        let root = lines
            .iter()
            .position(|line| line.starts_with("- [comment_1]"))
            .unwrap_or_else(|| panic!("root line missing:\n{output}"));
        assert!(lines[root + 1].starts_with("    > [comment_2]"));
    }

    #[test]
    fn detail_marks_invalid_dates_and_empty_threads() {
        let task = Task {
            id: TaskId::from("x"),
            title: "Broken".into(),
            body: String::new(),
            due_date: DueDate::new("next tuesday"),
            completed: false,
            assigned_to: "nobody".into(),
            comments: Vec::new(),
        };
        let output = task_detail(&task, &AssigneeConfig::default(), &Session::Anonymous);
        assert!(output.contains("Due: Invalid date"));
        assert!(output.contains("Assigned to: nobody"));
        assert!(output.ends_with("No comments\n"));
    }

    #[test]
    fn orphaned_reply_renders_as_its_own_thread() {
        let mut task = seed_task("3");
        task.comments.retain(|comment| comment.id.as_str() == "comment_2");
        let output = task_detail(&task, &AssigneeConfig::default(), &Session::Anonymous);
        assert!(output.contains("- [comment_2]"));
        assert!(!output.contains("    > "));
    }

    #[test]
    fn own_comments_are_marked() {
        let mut task = seed_task("1");
        task.comments.push(Comment {
            id: CommentId::from("mine"),
            task_id: task.id.clone(),
            user_id: "alex_jones".into(),
            text: "on it".into(),
            timestamp: datetime!(2024-12-02 09:00 UTC),
            parent_id: None,
        });
        let session =
            Session::authenticated("alex_jones").unwrap_or_else(|err| panic!("session: {err}"));
        let output = task_detail(&task, &AssigneeConfig::default(), &session);
        assert!(output.contains("[mine] Alex Jones (you), 2024-12-02T09:00:00Z: on it"));
    }

    #[test]
    fn table_marks_overdue_open_tasks() {
        let tasks = vec![Arc::new(seed_task("1")), Arc::new(seed_task("2"))];
        let output = task_table(
            &tasks,
            &Columns::default(),
            &AssigneeConfig::default(),
            datetime!(2025-06-01 00:00 UTC),
        );
        let rows: Vec<&str> = output.lines().skip(2).collect();
        assert!(rows[0].contains("(overdue)"));
        assert!(!rows[1].contains("(overdue)"));
        assert!(rows[1].contains(" | completed | "));
        assert!(rows[0].ends_with(" | 1/2"));
    }

    #[test]
    fn summary_counts_overdue_across_the_store() {
        let tasks = seed::builtin().unwrap_or_else(|err| panic!("seed: {err}"));
        let store = TaskStore::with_tasks(tasks, "alice").unwrap_or_else(|err| panic!("store: {err}"));
        let summary = list_summary(2, &store.snapshot(), datetime!(2025-06-01 00:00 UTC));
        assert_eq!(summary, "\n2 of 8 tasks shown, 5 overdue\n");
        let early = list_summary(8, &store.snapshot(), datetime!(2024-01-01 00:00 UTC));
        assert_eq!(early, "\n8 of 8 tasks shown, 0 overdue\n");
    }

    #[test]
    fn column_list_flags_required_columns() {
        let mut columns = Columns::default();
        columns.hide(ColumnId::Body);
        let output = column_list(&columns);
        assert!(output.contains("Title (title): shown, required"));
        assert!(output.contains("Description (body): hidden\n"));
    }

    #[test]
    fn assignee_list_falls_back_to_ids() {
        let users: BTreeSet<String> = ["jane_smith", "zed"].into_iter().map(str::to_owned).collect();
        let output = assignee_list(&users, &AssigneeConfig::default());
        assert_eq!(output, "jane_smith (Jane Smith)\nzed\n");
        assert_eq!(assignee_list(&BTreeSet::new(), &AssigneeConfig::default()), "No assignees\n");
    }
}
