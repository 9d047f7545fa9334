// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed host (os-release file and home
// directory) and an in-memory `Log` so each integration test can drive a
// full run and inspect what was reported.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bootstrap_cli::commands::bootstrap::{self, Host};
use bootstrap_cli::exec::{Executor, RecordingExecutor};
use bootstrap_cli::logging::{Log, TaskEntry, TaskStatus};
use bootstrap_cli::runner::{ExecutionMode, Invocation};

/// Kind of message captured by [`MemoryLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Stage,
    Info,
    Debug,
    Warn,
    Error,
    DryRun,
    Command,
}

/// [`Log`] implementation that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemoryLog {
    messages: Mutex<Vec<(Level, String)>>,
    tasks: Mutex<Vec<TaskEntry>>,
}

impl MemoryLog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, level: Level, msg: &str) {
        self.messages
            .lock()
            .expect("messages poisoned")
            .push((level, msg.to_string()));
    }

    /// Messages logged at `level`, in order.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.messages
            .lock()
            .expect("messages poisoned")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Names of recorded steps, in order.
    pub fn step_names(&self) -> Vec<String> {
        self.entries().into_iter().map(|t| t.name).collect()
    }

    /// All recorded step entries.
    pub fn entries(&self) -> Vec<TaskEntry> {
        self.tasks.lock().expect("tasks poisoned").clone()
    }

    /// Whether the final success message was logged.
    pub fn completed(&self) -> bool {
        self.messages(Level::Info)
            .iter()
            .any(|m| m.starts_with("bootstrap complete"))
    }
}

impl Log for MemoryLog {
    fn stage(&self, msg: &str) {
        self.push(Level::Stage, msg);
    }
    fn info(&self, msg: &str) {
        self.push(Level::Info, msg);
    }
    fn debug(&self, msg: &str) {
        self.push(Level::Debug, msg);
    }
    fn warn(&self, msg: &str) {
        self.push(Level::Warn, msg);
    }
    fn error(&self, msg: &str) {
        self.push(Level::Error, msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push(Level::DryRun, msg);
    }
    fn command(&self, msg: &str) {
        self.push(Level::Command, msg);
    }
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>) {
        self.tasks.lock().expect("tasks poisoned").push(TaskEntry {
            name: name.to_string(),
            status,
            message: message.map(String::from),
        });
    }
}

/// An isolated host backed by a [`tempfile::TempDir`].
pub struct TestHost {
    pub dir: tempfile::TempDir,
    pub host: Host,
}

impl TestHost {
    /// A host whose os-release reports `id`.
    pub fn new(id: &str) -> Self {
        Self::with_os_release(&format!("NAME=\"Test\"\nID={id}\nVERSION_ID=\"1\"\n"))
    }

    /// A host with the given raw os-release content.
    pub fn with_os_release(content: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let os_release = dir.path().join("os-release");
        std::fs::write(&os_release, content).expect("write os-release");
        let home = dir.path().join("home");
        std::fs::create_dir_all(&home).expect("create home");
        Self {
            host: Host {
                os_release,
                home,
                data_home: None,
            },
            dir,
        }
    }

    /// Pretend Oh-My-Zsh is already installed.
    pub fn with_oh_my_zsh(self) -> Self {
        std::fs::create_dir_all(self.home().join(".oh-my-zsh")).expect("create .oh-my-zsh");
        self
    }

    pub fn home(&self) -> &Path {
        &self.host.home
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.host.home.join(relative)
    }

    /// Run the full sequence against this host.
    pub fn run(
        &self,
        mode: ExecutionMode,
        executor: &Arc<RecordingExecutor>,
    ) -> (anyhow::Result<Vec<Invocation>>, Arc<MemoryLog>) {
        let log = MemoryLog::new();
        let result = bootstrap::execute(
            &self.host,
            mode,
            Arc::clone(executor) as Arc<dyn Executor>,
            Arc::clone(&log) as Arc<dyn Log>,
        );
        (result, log)
    }
}

/// Command lines of a transcript, with the home directory replaced by `~`
/// so snapshots do not depend on the temp dir location.
pub fn commands(transcript: &[Invocation], home: &Path) -> Vec<String> {
    let home = home.to_string_lossy();
    transcript
        .iter()
        .map(|i| i.command.replace(home.as_ref(), "~"))
        .collect()
}
