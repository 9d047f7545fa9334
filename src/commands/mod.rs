//! Run orchestration shared by the entry point and tests.
pub mod bootstrap;

use std::path::Path;

use anyhow::{Context as _, Result};

use crate::config::Config;
use crate::logging::Log;
use crate::platform::Platform;
use crate::tasks::{self, Context, Task};

/// Shared state produced before any step runs.
///
/// Detection and catalog loading both happen here, so a host that cannot
/// be identified fails before a single command is reported.
#[derive(Debug)]
pub struct CommandSetup {
    /// Detected host.
    pub platform: Platform,
    /// Embedded catalog.
    pub config: Config,
}

impl CommandSetup {
    /// Detect the distribution from `os_release` and load the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the identification file is unreadable, names an
    /// unsupported distribution, or the embedded catalog is invalid.
    pub fn init(os_release: &Path, log: &dyn Log) -> Result<Self> {
        log.stage("Detecting distribution");
        let platform = Platform::detect_from(os_release)?;
        log.info(&format!(
            "{} detected, using {}",
            platform.os_id, platform.package_manager
        ));

        let config = Config::load().context("loading provisioning catalog")?;
        log.debug(&format!(
            "{} common packages",
            config.packages.common.len()
        ));
        log.debug(&format!("{} flatpak apps", config.flatpak.apps.len()));
        log.debug(&format!("{} font archives", config.fonts.archives.len()));
        log.debug(&format!("{} shell plugins", config.shell.plugins.len()));

        Ok(Self { platform, config })
    }
}

/// Execute every step in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the failing step's error; no later step runs.
pub fn run_tasks_to_completion<'a>(
    tasks: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
) -> Result<()> {
    for task in tasks {
        tasks::execute(task, ctx)?;
    }
    Ok(())
}
