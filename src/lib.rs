//! Distribution-adaptive workstation bootstrap.
//!
//! Detects the host's package ecosystem from `/etc/os-release`, then runs a
//! fixed sequence of provisioning steps (system update, packages, toolchain,
//! Flatpak, fonts, shell, kernel parameters, workspace, git) as shell
//! commands. Every command passes through a single runner that either
//! executes it or, in dry-run mode, only reports it.
//!
//! The public API is organised into layers:
//!
//! - **[`platform`]** detects the distribution and its package manager
//! - **[`runner`]** and **[`exec`]** run or report shell commands
//! - **[`config`]** holds the embedded provisioning catalog
//! - **[`tasks`]** are the ordered provisioning steps
//! - **[`commands`]** orchestrate a full run
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod platform;
pub mod runner;
pub mod tasks;
