//! System package update.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::platform::PackageManager;

/// Refresh package metadata and upgrade everything installed.
#[derive(Debug)]
pub struct SystemUpdate;

impl Task for SystemUpdate {
    fn name(&self) -> &'static str {
        "System update"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let pm = ctx.package_manager();
        match pm {
            PackageManager::AptGet => {
                ctx.runner.required("sudo apt-get update -qq")?;
                ctx.runner.required("sudo apt-get upgrade -qq -y")?;
                ctx.runner.best_effort("sudo apt-get autoremove -qq -y");
            }
            PackageManager::Dnf | PackageManager::Yum => {
                ctx.runner.required(format!("sudo {pm} upgrade -y"))?;
                ctx.runner.best_effort(format!("sudo {pm} autoremove -y"));
            }
        }
        Ok(TaskResult::completed(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::RecordingExecutor;
    use crate::runner::ExecutionMode;
    use crate::tasks::test_helpers::{make_context, make_context_with, reported};
    use std::sync::Arc;

    #[test]
    fn apt_get_updates_upgrades_then_autoremoves() {
        let (ctx, executor) = make_context("ubuntu", ExecutionMode::Real);
        assert_eq!(SystemUpdate.run(&ctx).unwrap(), TaskResult::Ok);
        assert_eq!(
            executor.commands(),
            vec![
                "sudo apt-get update -qq",
                "sudo apt-get upgrade -qq -y",
                "sudo apt-get autoremove -qq -y",
            ]
        );
    }

    #[test]
    fn yum_upgrades_then_autoremoves() {
        let (ctx, executor) = make_context("centos", ExecutionMode::Real);
        SystemUpdate.run(&ctx).unwrap();
        assert_eq!(
            executor.commands(),
            vec!["sudo yum upgrade -y", "sudo yum autoremove -y"]
        );
    }

    #[test]
    fn autoremove_failure_is_ignored() {
        let executor = Arc::new(RecordingExecutor::new().failing_on("autoremove"));
        let ctx = make_context_with("fedora", ExecutionMode::Real, executor);
        assert_eq!(SystemUpdate.run(&ctx).unwrap(), TaskResult::Ok);
    }

    #[test]
    fn upgrade_failure_stops_the_step() {
        let executor = Arc::new(RecordingExecutor::new().failing_on("update -qq"));
        let ctx = make_context_with("debian", ExecutionMode::Real, Arc::clone(&executor));
        let err = SystemUpdate.run(&ctx).unwrap_err();
        assert!(err.to_string().contains("sudo apt-get update -qq"), "{err}");
        assert_eq!(executor.commands(), vec!["sudo apt-get update -qq"]);
    }

    #[test]
    fn dry_run_reports_without_running() {
        let (ctx, executor) = make_context("fedora", ExecutionMode::DryRun);
        assert_eq!(SystemUpdate.run(&ctx).unwrap(), TaskResult::DryRun);
        assert!(executor.commands().is_empty());
        assert_eq!(
            reported(&ctx),
            vec!["sudo dnf upgrade -y", "sudo dnf autoremove -y"]
        );
    }
}
