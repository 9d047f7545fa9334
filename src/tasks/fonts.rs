//! Nerd Font download and installation.
use anyhow::Result;

use super::{Context, Task, TaskResult, shell_path};
use crate::config::archive_file_name;
use crate::exec::quote;

/// Download the font archives into the user font directory.
///
/// `wget -c` resumes partial downloads and leaves complete ones alone.
#[derive(Debug)]
pub struct DownloadFonts;

impl Task for DownloadFonts {
    fn name(&self) -> &'static str {
        "Download fonts"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let fonts = shell_path(&ctx.fonts_dir());
        ctx.runner.required(format!("mkdir -p {fonts}"))?;
        for url in &ctx.config.fonts.archives {
            ctx.runner
                .required(format!("wget -c -P {fonts} {}", quote(url)))?;
        }
        Ok(TaskResult::completed(ctx))
    }
}

/// Extract the downloaded archives and rebuild the font cache.
#[derive(Debug)]
pub struct InstallFonts;

impl Task for InstallFonts {
    fn name(&self) -> &'static str {
        "Install fonts"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let dir = ctx.fonts_dir();
        let fonts = shell_path(&dir);
        for url in &ctx.config.fonts.archives {
            let Some(file) = archive_file_name(url) else {
                ctx.log.debug(&format!("no file name in {url}"));
                continue;
            };
            let archive = shell_path(&dir.join(file));
            ctx.runner
                .required(format!("unzip -o -q {archive} -d {fonts}"))?;
        }
        ctx.runner.best_effort("fc-cache -f");
        Ok(TaskResult::completed(ctx))
    }
}
