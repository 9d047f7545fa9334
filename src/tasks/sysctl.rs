//! Kernel parameter tuning via `/etc/sysctl.conf`.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::exec::quote;

const SYSCTL_CONF: &str = "/etc/sysctl.conf";

/// Replace `/etc/sysctl.conf` and reload kernel parameters.
#[derive(Debug)]
pub struct TuneKernelParameters;

impl Task for TuneKernelParameters {
    fn name(&self) -> &'static str {
        "Tune kernel parameters"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        ctx.runner
            .best_effort(format!("sudo cp {SYSCTL_CONF} {SYSCTL_CONF}.backup"));
        ctx.runner.required(format!(
            "sudo curl -fsSL {} -o {SYSCTL_CONF}",
            quote(&ctx.config.sysctl.url)
        ))?;
        ctx.runner.best_effort("sudo sysctl -p");
        Ok(TaskResult::completed(ctx))
    }
}
