//! Default shell change and Oh-My-Zsh setup.
use anyhow::Result;

use super::{Context, Task, TaskResult, shell_path};
use crate::exec::quote;

/// Make zsh the login shell and install Oh-My-Zsh if it is missing.
#[derive(Debug)]
pub struct ChangeShell;

impl Task for ChangeShell {
    fn name(&self) -> &'static str {
        "Change default shell"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        ctx.runner.required(r#"chsh -s "$(command -v zsh)""#)?;

        let omz = ctx.omz_dir();
        if ctx.fs_ops.exists(&omz) {
            ctx.log
                .info(&format!("Oh-My-Zsh already installed at {}", omz.display()));
        } else {
            ctx.runner.required(format!(
                r#"RUNZSH=no CHSH=no sh -c "$(curl -fsSL {})" "" --unattended"#,
                quote(&ctx.config.shell.framework_installer)
            ))?;
        }
        Ok(TaskResult::completed(ctx))
    }
}

/// Install plugins and the prompt, then replace `~/.zshrc`.
#[derive(Debug)]
pub struct ConfigureShellFramework;

impl Task for ConfigureShellFramework {
    fn name(&self) -> &'static str {
        "Configure shell framework"
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let shell = &ctx.config.shell;
        let custom = ctx.omz_custom_dir();
        let plugins_dir = custom.join("plugins");

        ctx.runner.required(format!(
            "mkdir -p {} {}",
            shell_path(&plugins_dir),
            shell_path(&custom.join("completions"))
        ))?;

        for plugin in &shell.plugins {
            ctx.runner.best_effort(format!(
                "git clone --depth=1 {} {}",
                quote(&plugin.repository),
                shell_path(&plugins_dir.join(&plugin.name))
            ));
        }

        ctx.runner.best_effort(format!(
            "curl -sS {} | sh -s -- -y",
            quote(&shell.prompt_installer)
        ));

        let zshrc = ctx.home_path(".zshrc");
        ctx.runner.best_effort(format!(
            "mv {} {}",
            shell_path(&zshrc),
            shell_path(&ctx.home_path(".zshrc.backup"))
        ));
        ctx.runner.required(format!(
            "curl -fsSL {} -o {}",
            quote(&shell.zshrc_url),
            shell_path(&zshrc)
        ))?;

        Ok(TaskResult::completed(ctx))
    }
}
