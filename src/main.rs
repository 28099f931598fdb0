//! Envprep - environment bootstrapper for the VEXIS agent
//!
//! A command line tool that prepares a host to run the agent: platform
//! detection, Python runtime installation, virtual environment management,
//! pinned dependency installation, and health validation.

use clap::Parser;

mod cli;
mod commands;
mod common;
mod config;
mod display;
mod environment;
mod error;
mod health;
mod installer;
mod manifest;
mod runtime;
mod sysinfo;
mod ui;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Bootstrap(args) => commands::bootstrap::run(cli.project, args),
        Commands::Purge(args) => commands::purge::run(cli.project, args),
        Commands::Doctor(args) => commands::doctor::run(cli.project, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        ui::fatal_line(&e);
        std::process::exit(1);
    }
}
