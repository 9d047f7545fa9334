//! Domain-specific error types for the bootstrap engine.
//!
//! Internal modules return typed errors while the orchestrator and
//! `main` work with [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! PlatformError: host identification unreadable or unsupported
//! CommandError:  a required shell command failed or could not start
//! TaskError:     a provisioning step stopped the run
//! ConfigError:   the embedded catalog failed to parse
//! ```
//!
//! Every one of these is fatal. Ignorable failures never become errors;
//! the command runner swallows them and logs a warning instead.

use thiserror::Error;

/// Errors that arise while identifying the host distribution.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// The OS identification file could not be read.
    #[error("UnsupportedDistribution: cannot read {path}: {source}")]
    Unreadable {
        /// Path of the identification file.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The identification file has no usable `ID` field, or the ID does
    /// not map to a supported package manager.
    #[error("UnsupportedDistribution: '{id}' is not one of fedora, rhel, centos, ubuntu, debian")]
    UnsupportedDistribution {
        /// The identifier that failed to match (empty when `ID` was absent).
        id: String,
    },
}

/// Errors raised by the command runner for required invocations.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The command ran and exited unsuccessfully.
    #[error("command `{command}` failed ({})", describe_status(.code))]
    Failed {
        /// The shell command line as issued.
        command: String,
        /// Exit status, or `None` when terminated by a signal.
        code: Option<i32>,
    },

    /// The shell could not be started at all.
    #[error("failed to execute `{command}`")]
    Spawn {
        /// The shell command line as issued.
        command: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

fn describe_status(code: &Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit {c}"),
    )
}

/// Errors that stop the provisioning sequence.
#[derive(Error, Debug)]
pub enum TaskError {
    /// A step failed; nothing after it runs.
    #[error("step '{task}' failed: {reason}")]
    ExecutionFailed {
        /// Name of the step that failed.
        task: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

/// Errors that arise from loading the provisioning catalog.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML source contains a syntax or schema error.
    #[error("Invalid TOML in {file}: {message}")]
    InvalidSyntax {
        /// Name of the catalog source.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A catalog entry is present but unusable.
    #[error("Invalid catalog entry [{section}]: {message}")]
    InvalidEntry {
        /// Section holding the bad entry.
        section: String,
        /// What is wrong with it.
        message: String,
    },
}
