//! Common packages and the compiler toolchain.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::exec::quote;
use crate::platform::PackageManager;

/// Install each common package whose command is missing from `PATH`.
///
/// The package name doubles as the probed command, so a second run on an
/// unchanged host installs nothing.
#[derive(Debug)]
pub struct InstallCommonPackages;

impl Task for InstallCommonPackages {
    fn name(&self) -> &'static str {
        "Install common packages"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let pm = ctx.package_manager();
        let mut installed = 0usize;

        for package in &ctx.config.packages.common {
            if ctx.tool_present(package) {
                ctx.log.info(&format!("{package} already installed"));
                continue;
            }
            ctx.log.debug(&format!("{package} not found on PATH"));
            ctx.runner
                .required(format!("sudo {pm} install -y {}", quote(package)))
                .with_context(|| format!("installing {package}"))?;
            ctx.record_install(package);
            installed += 1;
        }

        if installed == 0 {
            return Ok(TaskResult::Skipped("all packages already installed".to_string()));
        }
        ctx.log
            .debug(&format!("{installed} package(s) installed"));
        Ok(TaskResult::completed(ctx))
    }
}

/// Install the compiler toolchain appropriate to the backend.
#[derive(Debug)]
pub struct InstallDevToolchain;

impl Task for InstallDevToolchain {
    fn name(&self) -> &'static str {
        "Install development toolchain"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let pm = ctx.package_manager();
        match pm {
            PackageManager::Dnf | PackageManager::Yum => {
                let group = ctx
                    .runner
                    .best_effort(format!("sudo {pm} groupinstall -y 'Development Tools'"));
                if !group.success {
                    ctx.log
                        .info("group install unavailable, falling back to @development-tools");
                    ctx.runner
                        .required(format!("sudo {pm} install -y @development-tools"))?;
                }
            }
            PackageManager::AptGet => {
                ctx.runner.required("sudo apt-get install -y build-essential")?;
            }
        }
        Ok(TaskResult::completed(ctx))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exec::{Executor, RecordingExecutor};
    use crate::runner::ExecutionMode;
    use crate::tasks::test_helpers::{make_context, make_context_with, reported};
    use std::sync::Arc;

    fn all_packages(ctx: &Context) -> Vec<String> {
        ctx.config.packages.common.clone()
    }

    #[test]
    fn installs_one_invocation_per_missing_package() {
        let (ctx, executor) = make_context("fedora", ExecutionMode::Real);
        assert_eq!(InstallCommonPackages.run(&ctx).unwrap(), TaskResult::Ok);
        let expected: Vec<String> = all_packages(&ctx)
            .iter()
            .map(|p| format!("sudo dnf install -y {p}"))
            .collect();
        assert_eq!(executor.commands(), expected);
    }

    #[test]
    fn present_packages_are_not_reinstalled() {
        let executor = Arc::new(RecordingExecutor::new().with_available(["git", "zsh"]));
        let ctx = make_context_with("ubuntu", ExecutionMode::Real, Arc::clone(&executor));
        InstallCommonPackages.run(&ctx).unwrap();
        let commands = executor.commands();
        assert!(!commands.iter().any(|c| c.ends_with(" git")));
        assert!(!commands.iter().any(|c| c.ends_with(" zsh")));
        assert!(commands.contains(&"sudo apt-get install -y curl".to_string()));
    }

    #[test]
    fn second_run_on_unchanged_host_installs_nothing() {
        let executor = Arc::new(RecordingExecutor::new());
        let ctx = make_context_with("fedora", ExecutionMode::Real, Arc::clone(&executor));
        InstallCommonPackages.run(&ctx).unwrap();
        let first = executor.commands().len();
        assert_eq!(first, all_packages(&ctx).len());

        let packages = all_packages(&ctx);
        executor.make_available(packages.iter().map(String::as_str));
        let second = InstallCommonPackages.run(&ctx).unwrap();
        assert!(matches!(second, TaskResult::Skipped(_)));
        assert_eq!(executor.commands().len(), first);
    }

    #[test]
    fn install_failure_names_package() {
        let executor = Arc::new(RecordingExecutor::new().failing_on("install -y htop"));
        let ctx = make_context_with("fedora", ExecutionMode::Real, executor);
        let err = InstallCommonPackages.run(&ctx).unwrap_err();
        assert!(format!("{err:#}").contains("installing htop"), "{err:#}");
    }

    #[test]
    fn dry_run_still_probes_for_presence() {
        let executor = Arc::new(RecordingExecutor::new().with_available(["git"]));
        let ctx = make_context_with("fedora", ExecutionMode::DryRun, Arc::clone(&executor));
        InstallCommonPackages.run(&ctx).unwrap();
        assert!(executor.commands().is_empty());
        assert!(!reported(&ctx).iter().any(|c| c.ends_with(" git")));
    }

    #[test]
    fn dry_run_install_is_visible_to_later_steps() {
        let (ctx, executor) = make_context("ubuntu", ExecutionMode::DryRun);
        InstallCommonPackages.run(&ctx).unwrap();
        assert!(ctx.tool_present("flatpak"));
        assert!(!executor.which("flatpak"));
    }

    #[test]
    fn toolchain_uses_group_install_on_dnf() {
        let (ctx, executor) = make_context("fedora", ExecutionMode::Real);
        InstallDevToolchain.run(&ctx).unwrap();
        assert_eq!(
            executor.commands(),
            vec!["sudo dnf groupinstall -y 'Development Tools'"]
        );
    }

    #[test]
    fn toolchain_falls_back_when_group_install_fails() {
        let executor = Arc::new(RecordingExecutor::new().failing_on("groupinstall"));
        let ctx = make_context_with("rhel", ExecutionMode::Real, Arc::clone(&executor));
        assert_eq!(InstallDevToolchain.run(&ctx).unwrap(), TaskResult::Ok);
        assert_eq!(
            executor.commands(),
            vec![
                "sudo yum groupinstall -y 'Development Tools'",
                "sudo yum install -y @development-tools",
            ]
        );
    }

    #[test]
    fn toolchain_fallback_failure_is_fatal() {
        let executor = Arc::new(
            RecordingExecutor::new()
                .failing_on("groupinstall")
                .failing_on("@development-tools"),
        );
        let ctx = make_context_with("fedora", ExecutionMode::Real, executor);
        assert!(InstallDevToolchain.run(&ctx).is_err());
    }

    #[test]
    fn toolchain_uses_build_essential_on_apt() {
        let (ctx, executor) = make_context("debian", ExecutionMode::Real);
        InstallDevToolchain.run(&ctx).unwrap();
        assert_eq!(
            executor.commands(),
            vec!["sudo apt-get install -y build-essential"]
        );
    }

    #[test]
    fn toolchain_dry_run_reports_group_install_only() {
        let (ctx, _) = make_context("fedora", ExecutionMode::DryRun);
        assert_eq!(InstallDevToolchain.run(&ctx).unwrap(), TaskResult::DryRun);
        assert_eq!(
            reported(&ctx),
            vec!["sudo dnf groupinstall -y 'Development Tools'"]
        );
    }
}
