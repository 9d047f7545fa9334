//! The command runner: the single chokepoint for every external effect.
//!
//! Steps never call an [`Executor`] directly. They hand each shell command
//! to [`CommandRunner`] together with a [`Policy`], and the runner decides
//! (from the fixed [`ExecutionMode`]) whether to run it or only report it.
use std::sync::{Arc, Mutex};

use crate::error::CommandError;
use crate::exec::Executor;
use crate::logging::Log;

/// Whether commands take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Run every command.
    Real,
    /// Report every command, run nothing.
    DryRun,
}

impl ExecutionMode {
    /// Map the command-line dry-run flag to a mode.
    #[must_use]
    pub const fn from_dry_run(dry_run: bool) -> Self {
        if dry_run { Self::DryRun } else { Self::Real }
    }

    /// Returns `true` in dry-run mode.
    #[must_use]
    pub const fn is_dry_run(self) -> bool {
        matches!(self, Self::DryRun)
    }
}

/// How a non-zero exit is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Failure aborts the run.
    Required,
    /// Failure is logged and ignored.
    BestEffort,
}

/// A command line together with its failure policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Shell command line, passed verbatim to `sh -c`.
    pub command: String,
    /// Failure policy.
    pub policy: Policy,
}

/// What happened to a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// `false` in dry-run mode.
    pub executed: bool,
    /// Exit status when executed and not killed by a signal.
    pub status: Option<i32>,
    /// Dry-run always reports success.
    pub success: bool,
}

impl Outcome {
    const fn reported() -> Self {
        Self {
            executed: false,
            status: None,
            success: true,
        }
    }
}

/// Executes or reports shell commands according to the execution mode.
///
/// Every reported invocation is appended to a transcript, in order, so the
/// sequence a run produced can be inspected afterwards.
pub struct CommandRunner {
    mode: ExecutionMode,
    executor: Arc<dyn Executor>,
    log: Arc<dyn Log>,
    transcript: Mutex<Vec<Invocation>>,
}

impl std::fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner")
            .field("mode", &self.mode)
            .field("executor", &self.executor)
            .field("log", &"<dyn Log>")
            .finish_non_exhaustive()
    }
}

impl CommandRunner {
    /// Create a runner.
    #[must_use]
    pub fn new(mode: ExecutionMode, executor: Arc<dyn Executor>, log: Arc<dyn Log>) -> Self {
        Self {
            mode,
            executor,
            log,
            transcript: Mutex::new(Vec::new()),
        }
    }

    /// The mode this runner was created with.
    #[must_use]
    pub const fn mode(&self) -> ExecutionMode {
        self.mode
    }

    /// Run (or report) a single invocation.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] only for [`Policy::Required`] invocations that
    /// could not be started or exited unsuccessfully.
    pub fn run(&self, invocation: Invocation) -> Result<Outcome, CommandError> {
        if let Ok(mut guard) = self.transcript.lock() {
            guard.push(invocation.clone());
        }

        let Invocation { command, policy } = invocation;

        if self.mode.is_dry_run() {
            self.log.dry_run(&command);
            return Ok(Outcome::reported());
        }

        self.log.command(&command);
        let result = match self.executor.run(&command) {
            Ok(result) => result,
            Err(e) => {
                return match policy {
                    Policy::Required => Err(CommandError::Spawn { command, source: e }),
                    Policy::BestEffort => {
                        self.log
                            .warn(&format!("continuing: could not run `{command}`: {e}"));
                        Ok(Outcome {
                            executed: false,
                            status: None,
                            success: false,
                        })
                    }
                };
            }
        };

        let outcome = Outcome {
            executed: true,
            status: result.code,
            success: result.success,
        };

        if !result.success {
            match policy {
                Policy::Required => {
                    return Err(CommandError::Failed {
                        command,
                        code: result.code,
                    });
                }
                Policy::BestEffort => {
                    self.log.warn(&format!(
                        "continuing: `{command}` failed ({})",
                        result
                            .code
                            .map_or_else(|| "signal".to_string(), |c| format!("exit {c}"))
                    ));
                }
            }
        }

        Ok(outcome)
    }

    /// Run a command whose failure aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] if the command fails or cannot be started.
    pub fn required(&self, command: impl Into<String>) -> Result<Outcome, CommandError> {
        self.run(Invocation {
            command: command.into(),
            policy: Policy::Required,
        })
    }

    /// Run a command whose failure is logged and ignored.
    pub fn best_effort(&self, command: impl Into<String>) -> Outcome {
        self.run(Invocation {
            command: command.into(),
            policy: Policy::BestEffort,
        })
        .unwrap_or(Outcome {
            executed: false,
            status: None,
            success: false,
        })
    }

    /// All invocations reported so far, in order.
    #[must_use]
    pub fn transcript(&self) -> Vec<Invocation> {
        self.transcript
            .lock()
            .map_or_else(|_| vec![], |guard| guard.clone())
    }
}
