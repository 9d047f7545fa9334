//! The `bootstrap` run: detect, then provision.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use super::{CommandSetup, run_tasks_to_completion};
use crate::cli::Cli;
use crate::error::TaskError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::platform::OS_RELEASE_PATH;
use crate::runner::{ExecutionMode, Invocation};
use crate::tasks::{self, Context, Task};

/// Host inputs read by a run.
#[derive(Debug, Clone)]
pub struct Host {
    /// OS identification file.
    pub os_release: PathBuf,
    /// User's home directory.
    pub home: PathBuf,
    /// `$XDG_DATA_HOME`, when set.
    pub data_home: Option<PathBuf>,
}

impl Host {
    /// The running host, as seen through the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOME` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            os_release: PathBuf::from(OS_RELEASE_PATH),
            home: Context::home_from_env()?,
            data_home: Context::data_home_from_env(),
        })
    }
}

/// Run the bootstrap command.
///
/// # Errors
///
/// Returns an error if detection fails or any step hits a required failure.
pub fn run(cli: &Cli, log: &Arc<Logger>) -> Result<()> {
    let version = option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
    log.info(&format!("bootstrap {version}"));

    if !cli.extra.is_empty() {
        log.warn(&format!(
            "ignoring unexpected arguments: {}",
            cli.extra.join(" ")
        ));
    }

    let host = Host::from_env()?;
    let result = execute(
        &host,
        ExecutionMode::from_dry_run(cli.dry_run),
        Arc::new(SystemExecutor),
        Arc::clone(log) as Arc<dyn Log>,
    );

    log.print_summary();
    result.map(|_| ())
}

/// Log a run's fatal error unless a step already reported it.
///
/// Step failures are logged by [`tasks::execute`] as they happen; anything
/// else (detection, `$HOME`) reaches the user only through here.
pub fn report_failure(err: &anyhow::Error, log: &dyn Log) {
    if err.downcast_ref::<TaskError>().is_none() {
        log.error(&format!("{err:#}"));
    }
}

/// Detect the host, then run the full provisioning sequence.
///
/// Returns every invocation reported, in order.
///
/// # Errors
///
/// Returns an error if detection fails (before any command is reported) or
/// a step hits a required failure (no later step runs).
pub fn execute(
    host: &Host,
    mode: ExecutionMode,
    executor: Arc<dyn Executor>,
    log: Arc<dyn Log>,
) -> Result<Vec<Invocation>> {
    let CommandSetup { platform, config } = CommandSetup::init(&host.os_release, &*log)?;

    if mode.is_dry_run() {
        log.info("dry run: commands are reported, not run");
    }

    let ctx = Context::new(
        Arc::new(config),
        Arc::new(platform),
        Arc::clone(&log),
        mode,
        executor,
        host.home.clone(),
        host.data_home.clone(),
    );
    log.debug(&format!("fonts directory: {}", ctx.fonts_dir().display()));

    let all = tasks::all_tasks();
    let steps: Vec<&dyn Task> = all.iter().map(AsRef::as_ref).collect();
    run_tasks_to_completion(steps, &ctx)?;

    if mode.is_dry_run() {
        log.info("bootstrap complete (dry run, nothing was changed)");
    } else {
        log.info("bootstrap complete");
    }
    Ok(ctx.runner.transcript())
}
