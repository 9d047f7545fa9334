//! `bootstrap` binary entry point.
use std::process::ExitCode;
use std::sync::Arc;

use bootstrap_cli::cli::Cli;
use bootstrap_cli::commands;
use bootstrap_cli::logging::{self, Logger};
use clap::Parser;

const COMMAND: &str = "bootstrap";

fn main() -> ExitCode {
    let args = Cli::parse();
    logging::init_subscriber(args.verbose, COMMAND);
    let log = Arc::new(Logger::new(COMMAND));

    match commands::bootstrap::run(&args, &log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::bootstrap::report_failure(&e, &*log);
            ExitCode::FAILURE
        }
    }
}
