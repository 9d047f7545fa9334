//! Shared, immutable state handed to every step.
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::platform::{PackageManager, Platform};
use crate::runner::{CommandRunner, ExecutionMode};

/// Shared context for step execution.
///
/// Everything in here is fixed before the first step runs, except the
/// record of packages the run itself has installed.
pub struct Context {
    /// Catalog compiled into the binary.
    pub config: Arc<Config>,
    /// Detected host.
    pub platform: Arc<Platform>,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// The one chokepoint for external effects.
    pub runner: Arc<CommandRunner>,
    /// Read-only tool-presence probes.
    pub executor: Arc<dyn Executor>,
    /// User's home directory path.
    pub home: PathBuf,
    /// Base directory for user data files (`$XDG_DATA_HOME`).
    pub data_home: PathBuf,
    /// Filesystem query abstraction (injectable for testing).
    pub fs_ops: Arc<dyn FileSystemOps>,
    /// Packages installed (or, in dry-run, reported) earlier in this run.
    installed: Arc<Mutex<HashSet<String>>>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("platform", &self.platform)
            .field("log", &"<dyn Log>")
            .field("mode", &self.runner.mode())
            .field("home", &self.home)
            .field("data_home", &self.data_home)
            .field("executor", &self.executor)
            .field("fs_ops", &self.fs_ops)
            .field("installed", &self.installed)
            .finish()
    }
}

impl Context {
    /// Creates a new context for step execution.
    ///
    /// `data_home` falls back to `<home>/.local/share` when `None`.
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        platform: Arc<Platform>,
        log: Arc<dyn Log>,
        mode: ExecutionMode,
        executor: Arc<dyn Executor>,
        home: PathBuf,
        data_home: Option<PathBuf>,
    ) -> Self {
        let runner = CommandRunner::new(mode, Arc::clone(&executor), Arc::clone(&log));
        let data_home = data_home.unwrap_or_else(|| home.join(".local").join("share"));
        Self {
            config,
            platform,
            log,
            runner: Arc::new(runner),
            executor,
            home,
            data_home,
            fs_ops: Arc::new(SystemFileSystemOps),
            installed: Arc::default(),
        }
    }

    /// Resolve the user's home directory from `$HOME`.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is unset or empty.
    pub fn home_from_env() -> Result<PathBuf> {
        match std::env::var_os("HOME") {
            Some(home) if !home.is_empty() => Ok(PathBuf::from(home)),
            _ => anyhow::bail!("HOME environment variable is not set"),
        }
    }

    /// Resolve `$XDG_DATA_HOME`, ignoring empty or relative values.
    #[must_use]
    pub fn data_home_from_env() -> Option<PathBuf> {
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
    }

    /// The detected package-manager backend.
    #[must_use]
    pub fn package_manager(&self) -> PackageManager {
        self.platform.package_manager
    }

    /// Whether commands are only reported.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.runner.mode().is_dry_run()
    }

    /// Note that this run installed `package`.
    ///
    /// In dry-run the install was only reported, but later steps plan as if
    /// it had happened, so their reported commands match a real run.
    pub fn record_install(&self, package: &str) {
        if let Ok(mut guard) = self.installed.lock() {
            guard.insert(package.to_string());
        }
    }

    /// Whether `program` is on `PATH` or was installed earlier in this run.
    #[must_use]
    pub fn tool_present(&self, program: &str) -> bool {
        self.executor.which(program)
            || self
                .installed
                .lock()
                .is_ok_and(|guard| guard.contains(program))
    }

    /// Per-user font directory.
    #[must_use]
    pub fn fonts_dir(&self) -> PathBuf {
        self.data_home.join("fonts")
    }

    /// Oh-My-Zsh installation directory.
    #[must_use]
    pub fn omz_dir(&self) -> PathBuf {
        self.home.join(".oh-my-zsh")
    }

    /// Oh-My-Zsh custom directory (plugins, completions).
    #[must_use]
    pub fn omz_custom_dir(&self) -> PathBuf {
        self.omz_dir().join("custom")
    }

    /// Resolve a path relative to the home directory.
    #[must_use]
    pub fn home_path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.home.join(relative)
    }

    /// Create a copy of this context with a different logger.
    ///
    /// The runner is rebuilt so command output goes to the new logger too.
    #[must_use]
    pub fn with_log(&self, log: Arc<dyn Log>) -> Self {
        let runner = CommandRunner::new(
            self.runner.mode(),
            Arc::clone(&self.executor),
            Arc::clone(&log),
        );
        Self {
            config: Arc::clone(&self.config),
            platform: Arc::clone(&self.platform),
            log,
            runner: Arc::new(runner),
            executor: Arc::clone(&self.executor),
            home: self.home.clone(),
            data_home: self.data_home.clone(),
            fs_ops: Arc::clone(&self.fs_ops),
            installed: Arc::clone(&self.installed),
        }
    }

    /// Create a copy of this context with a different [`FileSystemOps`].
    #[must_use]
    pub fn with_fs_ops(self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        Self { fs_ops, ..self }
    }
}

/// Render a path for a shell command line, quoting when needed.
#[must_use]
pub fn shell_path(path: &Path) -> String {
    crate::exec::quote(&path.to_string_lossy())
}
