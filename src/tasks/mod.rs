//! The provisioning steps, in the fixed order they run.
mod context;
pub mod flatpak;
pub mod fonts;
pub mod git_config;
pub mod packages;
pub mod shell;
pub mod sysctl;
pub mod update;
pub mod version_managers;
pub mod workspace;

pub use context::{Context, shell_path};

use anyhow::Result;

use crate::error::TaskError;
use crate::logging::TaskStatus;

/// Result of a single step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// Every command ran.
    Ok,
    /// The step's own precondition was not met; nothing ran.
    Skipped(String),
    /// Commands were reported but not run.
    DryRun,
}

impl TaskResult {
    /// `DryRun` when the context only reports commands, otherwise `Ok`.
    #[must_use]
    pub fn completed(ctx: &Context) -> Self {
        if ctx.is_dry_run() { Self::DryRun } else { Self::Ok }
    }
}

/// A named provisioning step.
pub trait Task: Send + Sync {
    /// Human-readable step name.
    fn name(&self) -> &'static str;

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error when a required command fails; the run stops there.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// The complete provisioning sequence. Order is significant.
#[must_use]
pub fn all_tasks() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(update::SystemUpdate),
        Box::new(packages::InstallCommonPackages),
        Box::new(packages::InstallDevToolchain),
        Box::new(version_managers::InstallVersionManagers),
        Box::new(flatpak::RegisterFlatpakRemote),
        Box::new(flatpak::InstallFlatpakApps),
        Box::new(fonts::DownloadFonts),
        Box::new(fonts::InstallFonts),
        Box::new(shell::ChangeShell),
        Box::new(shell::ConfigureShellFramework),
        Box::new(sysctl::TuneKernelParameters),
        Box::new(workspace::CreateWorkspace),
        Box::new(git_config::SeedGitConfig),
    ]
}

/// Execute a step, recording the result in the logger.
///
/// # Errors
///
/// Returns [`TaskError::ExecutionFailed`] if the step failed; the caller
/// must not run any later step.
pub fn execute(task: &dyn Task, ctx: &Context) -> Result<(), TaskError> {
    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok) => {
            ctx.log.record_task(task.name(), TaskStatus::Ok, None);
            Ok(())
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_task(task.name(), TaskStatus::Skipped, Some(&reason));
            Ok(())
        }
        Ok(TaskResult::DryRun) => {
            ctx.log.record_task(task.name(), TaskStatus::DryRun, None);
            Ok(())
        }
        Err(e) => {
            let reason = format!("{e:#}");
            ctx.log.error(&format!("{}: {reason}", task.name()));
            ctx.log
                .record_task(task.name(), TaskStatus::Failed, Some(&reason));
            Err(TaskError::ExecutionFailed {
                task: task.name().to_string(),
                reason,
            })
        }
    }
}
