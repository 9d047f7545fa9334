//! Shell-out seam: the [`Executor`] trait and its implementations.
use std::collections::HashSet;
use std::io;
use std::process::{Command, ExitStatus};
use std::sync::Mutex;

/// Result of a command execution.
///
/// Output is streamed straight to the terminal, so only the status is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecResult {
    /// Whether the command exited with status zero.
    pub success: bool,
    /// Exit code, or `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl ExecResult {
    /// A successful result with exit code zero.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// A failed result with the given exit code.
    #[must_use]
    pub const fn failed(code: i32) -> Self {
        Self {
            success: false,
            code: Some(code),
        }
    }
}

impl From<ExitStatus> for ExecResult {
    fn from(status: ExitStatus) -> Self {
        Self {
            success: status.success(),
            code: status.code(),
        }
    }
}

/// Runs shell command lines and answers tool-presence queries.
///
/// The production implementation is [`SystemExecutor`]; tests use
/// [`RecordingExecutor`]. Dry-run never reaches an executor's `run`.
pub trait Executor: Send + Sync + std::fmt::Debug {
    /// Run `command` through `sh -c`, inheriting stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns an error only if the shell could not be spawned. A non-zero
    /// exit is reported through [`ExecResult::success`].
    fn run(&self, command: &str) -> io::Result<ExecResult>;

    /// Check whether `program` is available on `PATH`. Read-only.
    fn which(&self, program: &str) -> bool;
}

/// Executor that runs commands on the host.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, command: &str) -> io::Result<ExecResult> {
        Command::new("sh")
            .arg("-c")
            .arg(command)
            .status()
            .map(ExecResult::from)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Executor that records every command instead of running it.
///
/// Commands containing any configured failure pattern report exit status
/// `1`; everything else succeeds. Programs registered with
/// [`with_available`](Self::with_available) are reported present by
/// [`which`](Executor::which).
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    commands: Mutex<Vec<String>>,
    failing: Vec<String>,
    unspawnable: Vec<String>,
    installs_to_path: bool,
    available: Mutex<HashSet<String>>,
}

impl RecordingExecutor {
    /// Create an executor where every command succeeds and no program is
    /// on `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every command containing `pattern` exit with status `1`.
    #[must_use]
    pub fn failing_on(mut self, pattern: &str) -> Self {
        self.failing.push(pattern.to_string());
        self
    }

    /// Make every command containing `pattern` fail to start at all.
    #[must_use]
    pub fn unspawnable_on(mut self, pattern: &str) -> Self {
        self.unspawnable.push(pattern.to_string());
        self
    }

    /// Put the package named by each successful `sudo <pm> install -y <pkg>`
    /// on `PATH`, the way a real package install would.
    #[must_use]
    pub const fn installing_to_path(mut self) -> Self {
        self.installs_to_path = true;
        self
    }

    /// Report each of `programs` as present on `PATH`.
    #[must_use]
    pub fn with_available<'a>(self, programs: impl IntoIterator<Item = &'a str>) -> Self {
        self.make_available(programs);
        self
    }

    /// Report each of `programs` as present from now on.
    pub fn make_available<'a>(&self, programs: impl IntoIterator<Item = &'a str>) {
        let mut guard = self
            .available
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.extend(programs.into_iter().map(String::from));
    }

    /// All commands passed to [`run`](Executor::run), in order.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .lock()
            .map_or_else(|_| vec![], |guard| guard.clone())
    }
}

impl Executor for RecordingExecutor {
    fn run(&self, command: &str) -> io::Result<ExecResult> {
        if let Ok(mut guard) = self.commands.lock() {
            guard.push(command.to_string());
        }
        if self.unspawnable.iter().any(|p| command.contains(p.as_str())) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "sh: not found"));
        }
        if self.failing.iter().any(|p| command.contains(p.as_str())) {
            return Ok(ExecResult::failed(1));
        }
        if self.installs_to_path
            && let Some(package) = installed_package(command)
        {
            self.make_available([package]);
        }
        Ok(ExecResult::ok())
    }

    fn which(&self, program: &str) -> bool {
        self.available
            .lock()
            .is_ok_and(|guard| guard.contains(program))
    }
}

/// The package named by a single-package `sudo <pm> install -y <pkg>` line.
fn installed_package(command: &str) -> Option<&str> {
    let rest = command.strip_prefix("sudo ")?;
    let (_, package) = rest.split_once(" install -y ")?;
    (!package.is_empty() && !package.contains(' ')).then_some(package)
}

/// Quote `word` for safe interpolation into a `sh -c` command line.
///
/// Words made only of characters the shell treats literally are returned
/// unchanged so transcripts stay readable.
#[must_use]
pub fn quote(word: &str) -> String {
    let is_plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:@%+=,".contains(c));
    if is_plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn system_run_success() {
        let result = SystemExecutor.run("true").unwrap();
        assert!(result.success);
        assert_eq!(result.code, Some(0));
    }

    #[test]
    fn system_run_failure_is_not_an_error() {
        let result = SystemExecutor.run("exit 3").unwrap();
        assert!(!result.success, "non-zero exit should set success=false");
        assert_eq!(result.code, Some(3));
    }

    #[test]
    fn system_which_finds_shell() {
        assert!(SystemExecutor.which("sh"), "sh should be on PATH");
    }

    #[test]
    fn system_which_missing_program() {
        assert!(!SystemExecutor.which("this-program-does-not-exist-12345"));
    }

    #[test]
    fn recording_executor_records_in_order() {
        let executor = RecordingExecutor::new();
        executor.run("first").unwrap();
        executor.run("second").unwrap();
        assert_eq!(executor.commands(), vec!["first", "second"]);
    }

    #[test]
    fn recording_executor_fails_matching_commands() {
        let executor = RecordingExecutor::new().failing_on("autoremove");
        assert!(!executor.run("sudo dnf autoremove -y").unwrap().success);
        assert!(executor.run("sudo dnf upgrade -y").unwrap().success);
    }

    #[test]
    fn recording_executor_which() {
        let executor = RecordingExecutor::new().with_available(["git"]);
        assert!(executor.which("git"));
        assert!(!executor.which("flatpak"));
        executor.make_available(["flatpak"]);
        assert!(executor.which("flatpak"));
    }

    #[test]
    fn recording_executor_spawn_failure() {
        let executor = RecordingExecutor::new().unspawnable_on("chsh");
        let err = executor.run("chsh -s zsh").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(executor.commands(), vec!["chsh -s zsh"]);
    }

    #[test]
    fn installing_puts_package_on_path() {
        let executor = RecordingExecutor::new().installing_to_path();
        executor.run("sudo dnf install -y flatpak").unwrap();
        executor.run("flatpak install -y flathub org.videolan.VLC").unwrap();
        assert!(executor.which("flatpak"));
        assert!(!executor.which("org.videolan.VLC"));
    }

    #[test]
    fn failed_install_leaves_path_unchanged() {
        let executor = RecordingExecutor::new()
            .installing_to_path()
            .failing_on("install -y jq");
        executor.run("sudo apt-get install -y jq").unwrap();
        assert!(!executor.which("jq"));
    }

    #[test]
    fn quote_leaves_plain_words() {
        assert_eq!(quote("/home/user/.zshrc"), "/home/user/.zshrc");
        assert_eq!(
            quote("https://example.com/a.zip"),
            "https://example.com/a.zip"
        );
    }

    #[test]
    fn quote_wraps_special_words() {
        assert_eq!(quote("Development Tools"), "'Development Tools'");
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote(""), "''");
    }
}
