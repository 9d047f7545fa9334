//! Flathub remote registration and application install.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::exec::quote;

const FLATPAK_MISSING: &str = "flatpak not found on PATH";

/// Register the Flathub remote.
#[derive(Debug)]
pub struct RegisterFlatpakRemote;

impl Task for RegisterFlatpakRemote {
    fn name(&self) -> &'static str {
        "Register Flatpak remote"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.tool_present("flatpak") {
            return Ok(TaskResult::Skipped(FLATPAK_MISSING.to_string()));
        }
        let flatpak = &ctx.config.flatpak;
        ctx.runner.required(format!(
            "flatpak remote-add --if-not-exists {} {}",
            quote(&flatpak.remote_name),
            quote(&flatpak.remote_url)
        ))?;
        Ok(TaskResult::completed(ctx))
    }
}

/// Refresh appstream data and install every catalog application in one
/// invocation.
#[derive(Debug)]
pub struct InstallFlatpakApps;

impl Task for InstallFlatpakApps {
    fn name(&self) -> &'static str {
        "Install Flatpak applications"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        if !ctx.tool_present("flatpak") {
            return Ok(TaskResult::Skipped(FLATPAK_MISSING.to_string()));
        }
        let flatpak = &ctx.config.flatpak;
        if flatpak.apps.is_empty() {
            return Ok(TaskResult::Skipped("no applications configured".to_string()));
        }

        ctx.runner.best_effort("flatpak update --appstream -y");

        let ids: Vec<String> = flatpak.apps.iter().map(|id| quote(id)).collect();
        ctx.runner.required(format!(
            "flatpak install -y {} {}",
            quote(&flatpak.remote_name),
            ids.join(" ")
        ))?;
        Ok(TaskResult::completed(ctx))
    }
}
