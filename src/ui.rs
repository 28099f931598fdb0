//! Terminal output helpers
//!
//! Styled status lines plus the single machine-parseable fatal line the
//! orchestrator emits before exiting non-zero.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::EnvprepError;

/// Announce a bootstrap step
pub fn step(name: &str, message: &str) {
    println!(
        "{} {}",
        Style::new().cyan().bold().apply_to(format!("[{name}]")),
        message
    );
}

/// Positive progress line
pub fn status(message: &str) {
    println!("  {} {}", Style::new().green().apply_to("ok"), message);
}

/// Non-fatal problem; bootstrap continues
pub fn warn(message: &str) {
    eprintln!(
        "  {} {}",
        Style::new().yellow().bold().apply_to("warning:"),
        message
    );
}

/// Extra detail shown only with --debug
pub fn detail(message: &str) {
    println!("  {}", Style::new().dim().apply_to(message));
}

/// Final machine-parseable error line, tagged with the failing step.
/// Format: `envprep: step=<name> error: <detail>`
pub fn fatal_line(err: &EnvprepError) {
    eprintln!("envprep: step={} error: {}", err.step(), err);
}

/// Spinner for long synchronous operations (runtime install, pip install)
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "]),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}
