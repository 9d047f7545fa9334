//! Workspace directory scaffolding.
use anyhow::Result;

use super::{Context, Task, TaskResult, shell_path};

/// Create the workspace directory tree under `$HOME`.
#[derive(Debug)]
pub struct CreateWorkspace;

impl Task for CreateWorkspace {
    fn name(&self) -> &'static str {
        "Create workspace directories"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for dir in &ctx.config.workspace.directories {
            let path = ctx.home_path(dir);
            ctx.runner
                .required(format!("mkdir -p {}", shell_path(&path)))?;
        }
        Ok(TaskResult::completed(ctx))
    }
}
