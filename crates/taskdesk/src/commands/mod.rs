use anyhow::{Result, anyhow};
use taskdesk_app::{ColumnId, Columns, ProjectConfig, TaskStore};
use taskdesk_core::{Completion, FilterSpec};
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::{Command, ListFormat};

mod render;

/// Execute a command against the configured store and return what to print.
pub fn run(command: Command, config: &ProjectConfig) -> Result<String> {
    let store = config.open_store()?;
    match command {
        Command::List {
            search,
            statuses,
            assignees,
            toggles,
            format,
        } => {
            let columns = list_columns(config, &toggles);
            list(&store, config, &columns, search.as_deref(), statuses, assignees, format)
        }
        Command::Show { task } => {
            let task = store
                .get(&task)
                .ok_or_else(|| anyhow!("task not found: {task}"))?;
            let session = config.session()?;
            Ok(render::task_detail(task, &config.assignees, &session))
        }
        Command::Assignees => Ok(render::assignee_list(
            &store.available_assignees(),
            &config.assignees,
        )),
        Command::Columns => Ok(render::column_list(&config.columns())),
    }
}

fn list(
    store: &TaskStore,
    config: &ProjectConfig,
    columns: &Columns,
    search: Option<&str>,
    statuses: Vec<Completion>,
    assignees: Vec<String>,
    format: ListFormat,
) -> Result<String> {
    let filter = build_filter(statuses, assignees);
    let query = search.unwrap_or_default();
    let visible = store.visible(query, &filter);
    debug!(
        query,
        facets = filter.active_count(),
        visible = visible.len(),
        total = store.len(),
        "Filtered tasks"
    );

    if format == ListFormat::Json {
        let tasks: Vec<_> = visible.iter().map(|task| &**task).collect();
        return Ok(format!("{}\n", serde_json::to_string_pretty(&tasks)?));
    }
    if visible.is_empty() {
        return Ok(if query.is_empty() && filter.is_empty() {
            "No tasks found\n".to_owned()
        } else {
            "No tasks matched the provided filters\n".to_owned()
        });
    }
    let now = OffsetDateTime::now_utc();
    let mut output = render::task_table(&visible, columns, &config.assignees, now);
    output.push_str(&render::list_summary(visible.len(), &store.snapshot(), now));
    Ok(output)
}

fn list_columns(config: &ProjectConfig, toggles: &[ColumnId]) -> Columns {
    let mut columns = config.columns();
    for &id in toggles {
        if !columns.toggle(id) {
            warn!(column = %id, "Required column stays visible");
        }
    }
    columns
}

fn build_filter(statuses: Vec<Completion>, assignees: Vec<String>) -> FilterSpec {
    FilterSpec {
        completion: statuses.into_iter().collect(),
        assignees: assignees.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn config() -> ProjectConfig {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        ProjectConfig::from_workdir(dir.path()).unwrap_or_else(|err| panic!("config: {err}"))
    }

    fn list_command(search: Option<&str>, statuses: Vec<Completion>, assignees: Vec<&str>) -> Command {
        Command::List {
            search: search.map(str::to_owned),
            statuses,
            assignees: assignees.into_iter().map(str::to_owned).collect(),
            toggles: Vec::new(),
            format: ListFormat::Table,
        }
    }

    fn table_rows(output: &str) -> Vec<&str> {
        output.lines().skip(2).take_while(|line| !line.is_empty()).collect()
    }

    #[test]
    fn list_prints_header_and_seed_rows() {
        let output = run(list_command(None, Vec::new(), Vec::new()), &config())
            .unwrap_or_else(|err| panic!("list: {err}"));
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "ID | Title | Description | Due Date | Status | Assigned To | Comments"
        );
        assert_eq!(table_rows(&output).len(), 8);
        assert!(lines[2].starts_with("1 | Complete project proposal |"));
        assert!(lines[2].contains("User 1"));
        let summary = lines.last().copied().unwrap_or_default();
        assert!(summary.starts_with("8 of 8 tasks shown, "), "{summary}");
        assert!(summary.ends_with(" overdue"));
    }

    #[test]
    fn list_applies_search_and_facets() {
        let output = run(
            list_command(Some("MEETING"), vec![Completion::Completed], vec!["jane_smith"]),
            &config(),
        )
        .unwrap_or_else(|err| panic!("list: {err}"));
        let rows = table_rows(&output);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("2 | Team meeting |"));
        assert!(output.contains("\n1 of 8 tasks shown, "));
    }

    #[test]
    fn list_reports_empty_results() {
        let output = run(list_command(Some("no such words"), Vec::new(), Vec::new()), &config())
            .unwrap_or_else(|err| panic!("list: {err}"));
        assert_eq!(output, "No tasks matched the provided filters\n");
    }

    #[test]
    fn list_hides_configured_columns() {
        let dir = tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
        fs::create_dir_all(dir.path().join(".taskdesk"))
            .unwrap_or_else(|err| panic!("mkdir: {err}"));
        fs::write(
            dir.path().join(".taskdesk/config.toml"),
            "[columns]\nhidden = [\"body\"]\n",
        )
        .unwrap_or_else(|err| panic!("write config: {err}"));
        let config =
            ProjectConfig::from_workdir(dir.path()).unwrap_or_else(|err| panic!("config: {err}"));

        let output = run(list_command(None, Vec::new(), Vec::new()), &config)
            .unwrap_or_else(|err| panic!("list: {err}"));
        assert!(!output.contains("Description"));
    }

    #[test]
    fn list_toggles_columns_over_config() {
        let mut config = config();
        config.columns.hidden = vec![ColumnId::Body];
        let columns = list_columns(&config, &[ColumnId::Body, ColumnId::AssignedTo, ColumnId::Title]);
        assert!(columns.is_visible(ColumnId::Body));
        assert!(!columns.is_visible(ColumnId::AssignedTo));
        assert!(columns.is_visible(ColumnId::Title));
        assert_eq!(columns.visible_count(), 4);
    }

    #[test]
    fn list_json_serializes_visible_tasks() {
        let command = Command::List {
            search: None,
            statuses: vec![Completion::Completed],
            assignees: Vec::new(),
            toggles: Vec::new(),
            format: ListFormat::Json,
        };
        let output = run(command, &config()).unwrap_or_else(|err| panic!("list: {err}"));
        let value: serde_json::Value =
            serde_json::from_str(&output).unwrap_or_else(|err| panic!("json: {err}"));
        let tasks = value.as_array().unwrap_or_else(|| panic!("expected array"));
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|task| task["completed"] == true));
    }

    #[test]
    fn show_unknown_task_fails() {
        let result = run(Command::Show { task: "missing".into() }, &config());
        assert!(result.is_err());
    }

    #[test]
    fn assignees_use_display_names() {
        let output = run(Command::Assignees, &config()).unwrap_or_else(|err| panic!("{err}"));
        assert!(output.contains("jane_smith (Jane Smith)"));
        assert_eq!(output.lines().count(), 4);
    }
}
