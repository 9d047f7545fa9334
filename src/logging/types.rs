//! Core logging types: task entries, status, and the [`Log`] trait.

/// Step execution result for summary reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Human-readable step name.
    pub name: String,
    /// Final status of the step.
    pub status: TaskStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Status of a completed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Step completed successfully.
    Ok,
    /// Step skipped its work because a precondition was not met
    /// (tool absent, already installed).
    Skipped,
    /// Step ran in dry-run mode; no changes were applied.
    DryRun,
    /// Step hit a required failure and stopped the run.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the console + file implementation;
/// tests substitute an in-memory recorder so step code can be exercised
/// without a global subscriber.
pub trait Log: Send + Sync {
    /// Log a stage header (one per step).
    fn stage(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a debug message (may be suppressed on console).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log a command that would have run in real mode.
    fn dry_run(&self, msg: &str);
    /// Log a command that is about to run.
    fn command(&self, msg: &str);
    /// Record a step result for the summary.
    fn record_task(&self, name: &str, status: TaskStatus, message: Option<&str>);
}
