//! Python runtime location and installation
//!
//! Probes an ordered list of candidate interpreter commands, validates the
//! version against the minimum, and falls back to a platform-specific chain
//! of install strategies when nothing acceptable is on PATH. Detection is
//! re-run after every install attempt; an installer's exit status alone is
//! never trusted.

pub mod strategy;

use std::path::PathBuf;

use crate::common;
use crate::error::{self, Result};
use crate::sysinfo::SystemInfo;
use crate::ui;

/// Minimum interpreter version the agent supports
pub const MIN_VERSION: (u32, u32) = (3, 8);

/// Candidate command names, in probe order
pub const CANDIDATES: [&str; 3] = ["python3", "python", "py"];

/// A located, version-validated interpreter
#[derive(Debug, Clone)]
pub struct RuntimeDescriptor {
    pub command: String,
    pub version: (u32, u32),
    pub path: PathBuf,
}

impl RuntimeDescriptor {
    pub fn version_string(&self) -> String {
        format!("{}.{}", self.version.0, self.version.1)
    }
}

/// Parse "Python 3.11.4" style `--version` output into (major, minor)
pub fn parse_version(output: &str) -> Option<(u32, u32)> {
    let rest = output.trim().strip_prefix("Python")?.trim();
    let mut parts = rest.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts
        .next()?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect::<String>()
        .parse()
        .ok()?;
    Some((major, minor))
}

fn meets_minimum(version: (u32, u32)) -> bool {
    version >= MIN_VERSION
}

/// Probe the candidate list and return the first interpreter that answers
/// `--version`, regardless of whether the version is acceptable.
fn probe_candidates() -> Option<RuntimeDescriptor> {
    for candidate in CANDIDATES {
        let Some(path) = common::which(candidate) else {
            continue;
        };
        let Ok(result) = common::run_command(&path, &["--version"]) else {
            continue;
        };
        if !result.success {
            continue;
        }
        // Some interpreters print the version on stderr (Python 2 did)
        let text = if result.stdout.trim().is_empty() {
            result.stderr
        } else {
            result.stdout
        };
        if let Some(version) = parse_version(&text) {
            return Some(RuntimeDescriptor {
                command: candidate.to_string(),
                version,
                path,
            });
        }
    }
    None
}

/// Locate an acceptable runtime without attempting installation.
///
/// An interpreter below [`MIN_VERSION`] is rejected, not silently accepted;
/// `check_version` exists for the `--skip-runtime-check` escape hatch.
pub fn locate(check_version: bool) -> Option<RuntimeDescriptor> {
    let found = probe_candidates()?;
    if !check_version || meets_minimum(found.version) {
        Some(found)
    } else {
        None
    }
}

/// Locate a runtime, installing one via the platform strategy chain if needed.
pub fn ensure(info: &SystemInfo, check_version: bool, debug: bool) -> Result<RuntimeDescriptor> {
    if let Some(runtime) = locate(check_version) {
        return Ok(runtime);
    }

    if let Some(found) = probe_candidates() {
        ui::warn(&format!(
            "Found Python {}.{} at {} but {}.{}+ is required",
            found.version.0,
            found.version.1,
            found.path.display(),
            MIN_VERSION.0,
            MIN_VERSION.1
        ));
    }

    let strategies = strategy::strategies_for(info.family)?;
    let mut attempts: Vec<String> = Vec::new();

    for strat in strategies {
        ui::status(&format!("Trying install strategy: {}", strat.name()));
        match strat.attempt(debug) {
            Ok(()) => {}
            Err(reason) => {
                ui::warn(&format!("{} failed: {}", strat.name(), reason));
                attempts.push(format!("{}: {}", strat.name(), reason));
                continue;
            }
        }
        // Re-probe after every attempt; the installer exiting zero proves nothing
        if let Some(runtime) = locate(check_version) {
            return Ok(runtime);
        }
        attempts.push(format!(
            "{}: completed but no acceptable interpreter appeared on PATH",
            strat.name()
        ));
    }

    Err(error::runtime_unavailable(if attempts.is_empty() {
        "no candidate interpreter on PATH and no install strategy available".to_string()
    } else {
        format!("all install strategies exhausted ({})", attempts.join("; "))
    }))
}
