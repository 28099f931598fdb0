use clap::Parser;

/// Arguments for the doctor command
#[derive(Parser, Debug)]
pub struct DoctorArgs {
    /// Show every command executed and its output
    #[arg(long, short = 'd')]
    pub debug: bool,
}
