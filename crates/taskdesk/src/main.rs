//! CLI entry point for taskdesk.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use taskdesk_app::{ColumnId, ProjectConfig};
use taskdesk_core::Completion;
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt::format::FmtSpan};

mod commands;

/// In-memory task desk with threaded comments.
#[derive(Parser, Debug)]
#[command(
    name = "taskdesk",
    version,
    about = "taskdesk: search, filter, and inspect a task collection"
)]
struct Cli {
    /// Directory holding `.taskdesk/config.toml` (defaults to current).
    #[arg(long, global = true)]
    workdir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List visible tasks.
    List {
        /// Case-insensitive text matched against title, description, and assignee.
        #[arg(short = 's', long)]
        search: Option<String>,
        /// Keep tasks in this completion state (repeatable).
        #[arg(long = "status")]
        statuses: Vec<Completion>,
        /// Keep tasks assigned to this user (repeatable).
        #[arg(short = 'a', long = "assignee")]
        assignees: Vec<String>,
        /// Flip a column's configured visibility (repeatable; required columns stay shown).
        #[arg(long = "toggle", value_name = "COLUMN")]
        toggles: Vec<ColumnId>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Show one task with its comment threads.
    Show {
        #[arg(long)]
        task: String,
    },

    /// List assignees across all tasks.
    Assignees,

    /// Show table columns and their visibility.
    Columns,
}

/// Output format for `list`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ListFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let Cli { workdir, cmd } = Cli::parse();
    install_tracing();

    let workdir = workdir.unwrap_or_else(|| PathBuf::from("."));
    let config = ProjectConfig::from_workdir(&workdir)?;
    let output = commands::run(cmd, &config)?;
    print!("{output}");
    Ok(())
}

fn install_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// `RUST_LOG`-style directives; INFO applies when none are given.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}
