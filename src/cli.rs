//! Command-line interface.
use clap::Parser;

/// Top-level CLI entry point for the environment bootstrap tool.
#[derive(Parser, Debug)]
#[command(
    name = "bootstrap",
    about = "Provision a fresh Linux host: packages, toolchains, fonts, shell and dotfiles",
    version = option_env!("BOOTSTRAP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Preview every command without running any of them
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Ignored; accepted for compatibility with older invocations
    #[arg(
        hide = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub extra: Vec<String>,
}
