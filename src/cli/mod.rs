//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - bootstrap: Bootstrap command arguments
//! - purge: Purge command arguments
//! - doctor: Doctor command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod bootstrap;
pub mod completions;
pub mod doctor;
pub mod purge;

pub use bootstrap::BootstrapArgs;
pub use completions::CompletionsArgs;
pub use doctor::DoctorArgs;
pub use purge::PurgeArgs;

/// Envprep - environment bootstrapper for the VEXIS agent
///
/// Detects the host platform, installs a Python runtime when missing,
/// manages the project's virtual environment, and installs pinned
/// dependencies.
#[derive(Parser, Debug)]
#[command(
    name = "envprep",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Cross-platform dependency and environment bootstrapper",
    long_about = "Envprep prepares a host to run the VEXIS agent: it detects the platform, \
                  locates or installs a Python 3.8+ runtime, creates the project's virtual \
                  environment, installs the pinned dependency manifest, and validates the result.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  envprep bootstrap                      \x1b[90m# Full bootstrap of the current project\x1b[0m\n   \
                  envprep bootstrap --force              \x1b[90m# Recreate the environment from scratch\x1b[0m\n   \
                  envprep bootstrap --skip-validation    \x1b[90m# Skip the post-install health checks\x1b[0m\n   \
                  envprep doctor                         \x1b[90m# Report environment health, change nothing\x1b[0m\n   \
                  envprep purge --yes                    \x1b[90m# Delete all environment directories\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to current directory)
    #[arg(long, short = 'p', global = true, env = "ENVPREP_PROJECT")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare the environment end to end
    Bootstrap(BootstrapArgs),

    /// Delete environment directories and build artifacts
    Purge(PurgeArgs),

    /// Report environment health without changing anything
    Doctor(DoctorArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
