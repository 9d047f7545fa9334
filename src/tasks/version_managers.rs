//! SDKMAN and nvm installers.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};

/// Run the SDK and Node version-manager installers.
#[derive(Debug)]
pub struct InstallVersionManagers;

impl Task for InstallVersionManagers {
    fn name(&self) -> &'static str {
        "Install version managers"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for manager in &ctx.config.version_managers {
            ctx.log.info(&format!("installing {}", manager.name));
            ctx.runner
                .required(manager.install.as_str())
                .with_context(|| format!("installing {}", manager.name))?;
        }
        Ok(TaskResult::completed(ctx))
    }
}
