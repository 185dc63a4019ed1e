//! Project configuration loaded from `.taskdesk/config.toml`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskdesk_core::Task;
use tracing::debug;

use crate::columns::{ColumnId, Columns};
use crate::seed;
use crate::session::Session;
use crate::store::TaskStore;

const CONFIG_DIR: &str = ".taskdesk";
const CONFIG_FILE: &str = "config.toml";

/// Assignee given to drafts that do not name one.
pub const DEFAULT_ASSIGNEE: &str = "hxHGVRb1YJUscrCB8eXK";

/// Top-level project configuration loaded from `.taskdesk/config.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// Signed-in user.
    #[serde(default)]
    pub session: SessionConfig,
    /// Assignee defaults and display names.
    #[serde(default)]
    pub assignees: AssigneeConfig,
    /// Column visibility presets.
    #[serde(default)]
    pub columns: ColumnConfig,
    /// Seed dataset location.
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(skip)]
    root: PathBuf,
}

impl ProjectConfig {
    /// Load configuration from a working directory. A missing file yields defaults.
    ///
    /// # Errors
    /// Fails when the file cannot be read or parsed, or does not validate.
    pub fn from_workdir(workdir: impl AsRef<Path>) -> Result<Self> {
        let workdir = workdir.as_ref();
        let config_path = workdir.join(CONFIG_DIR).join(CONFIG_FILE);
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file; using defaults");
            return Ok(Self {
                root: workdir.to_path_buf(),
                ..Self::default()
            });
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", config_path.display()))?;
        config.validate()?;
        config.root = workdir.to_path_buf();
        debug!(path = %config_path.display(), "Loaded config");
        Ok(config)
    }

    /// Directory the configuration was loaded from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Seed file resolved against the working directory, if configured.
    #[must_use]
    pub fn seed_path(&self) -> Option<PathBuf> {
        self.seed.path.as_ref().map(|path| self.root.join(path))
    }

    /// Load the configured seed, falling back to the built-in dataset.
    ///
    /// # Errors
    /// Propagates seed read and parse failures.
    pub fn seed_tasks(&self) -> Result<Vec<Task>> {
        self.seed_path().map_or_else(
            || seed::builtin().context("failed to load built-in seed"),
            |path| {
                seed::from_path(&path)
                    .with_context(|| format!("failed to load seed from {}", path.display()))
            },
        )
    }

    /// Store initialised from the configured seed and default assignee.
    ///
    /// # Errors
    /// Propagates [`ProjectConfig::seed_tasks`] failures.
    pub fn open_store(&self) -> Result<TaskStore> {
        let tasks = self.seed_tasks()?;
        Ok(TaskStore::with_tasks(tasks, self.assignees.default.clone())?)
    }

    /// Session for the configured user, anonymous when none is set.
    ///
    /// # Errors
    /// Fails when the configured user id is blank.
    pub fn session(&self) -> Result<Session> {
        self.session.user.as_deref().map_or(Ok(Session::Anonymous), |user| {
            Session::authenticated(user).context("invalid [session] user")
        })
    }

    /// Column set with configured columns hidden.
    #[must_use]
    pub fn columns(&self) -> Columns {
        Columns::with_hidden(&self.columns.hidden)
    }

    fn validate(&self) -> Result<()> {
        self.columns.ensure_optional()?;
        self.assignees.ensure_default()?;
        self.session.ensure_user()
    }
}

/// `[session]` block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionConfig {
    /// User signed in at startup.
    #[serde(default)]
    pub user: Option<String>,
}

impl SessionConfig {
    fn ensure_user(&self) -> Result<()> {
        if self.user.as_deref().is_some_and(|user| user.trim().is_empty()) {
            bail!("session user must not be empty");
        }
        Ok(())
    }
}

/// `[assignees]` block.
#[derive(Debug, Clone, Deserialize)]
pub struct AssigneeConfig {
    /// Assignee for drafts that do not name one.
    #[serde(default = "default_assignee")]
    pub default: String,
    /// Display names keyed by user id.
    #[serde(default = "builtin_names")]
    pub names: BTreeMap<String, String>,
}

impl Default for AssigneeConfig {
    fn default() -> Self {
        Self {
            default: default_assignee(),
            names: builtin_names(),
        }
    }
}

impl AssigneeConfig {
    /// Display name for `user`, or the id itself when none is configured.
    #[must_use]
    pub fn display_name<'a>(&'a self, user: &'a str) -> &'a str {
        self.names.get(user).map_or(user, String::as_str)
    }

    fn ensure_default(&self) -> Result<()> {
        if self.default.trim().is_empty() {
            bail!("default assignee must not be empty");
        }
        Ok(())
    }
}

fn default_assignee() -> String {
    DEFAULT_ASSIGNEE.to_owned()
}

fn builtin_names() -> BTreeMap<String, String> {
    [
        (DEFAULT_ASSIGNEE, "User 1"),
        ("jane_smith", "Jane Smith"),
        ("alex_jones", "Alex Jones"),
        ("sarah_wilson", "Sarah Wilson"),
    ]
    .into_iter()
    .map(|(id, name)| (id.to_owned(), name.to_owned()))
    .collect()
}

/// `[columns]` block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ColumnConfig {
    /// Columns hidden at startup.
    #[serde(default)]
    pub hidden: Vec<ColumnId>,
}

impl ColumnConfig {
    fn ensure_optional(&self) -> Result<()> {
        if let Some(id) = self.hidden.iter().find(|id| id.is_required()) {
            bail!("column '{id}' is required and cannot be hidden");
        }
        Ok(())
    }
}

/// `[seed]` block.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeedConfig {
    /// JSON seed file, relative to the working directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
