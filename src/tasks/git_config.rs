//! Seed `~/.gitconfig` from the dotfiles repository.
use anyhow::Result;

use super::{Context, Task, TaskResult, shell_path};
use crate::exec::quote;

/// Download a starter `~/.gitconfig`.
#[derive(Debug)]
pub struct SeedGitConfig;

impl Task for SeedGitConfig {
    fn name(&self) -> &'static str {
        "Seed git configuration"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let outcome = ctx.runner.best_effort(format!(
            "curl -fsSL {} -o {}",
            quote(&ctx.config.git.gitconfig_url),
            shell_path(&ctx.home_path(".gitconfig"))
        ));
        if !outcome.success {
            ctx.log.debug("keeping existing git configuration");
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
    use crate::tasks::test_helpers::{make_context, make_context_with};
    use std::sync::Arc;

    #[test]
    fn downloads_into_home() {
        let (ctx, executor) = make_context("fedora", ExecutionMode::Real);
        SeedGitConfig.run(&ctx).unwrap();
        assert_eq!(
            executor.commands(),
            vec![
                "curl -fsSL https://raw.githubusercontent.com/devbox-bootstrap/dotfiles/main/git/.gitconfig -o /home/test/.gitconfig"
            ]
        );
    }

    #[test]
    fn download_failure_is_ignored() {
        let executor = Arc::new(RecordingExecutor::new().failing_on(".gitconfig"));
        let ctx = make_context_with("fedora", ExecutionMode::Real, executor);
        assert_eq!(SeedGitConfig.run(&ctx).unwrap(), TaskResult::Ok);
    }
}
