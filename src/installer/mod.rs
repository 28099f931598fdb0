//! Dependency installation into a valid environment
//!
//! Order matters: packaging tooling is upgraded first so modern wheel and
//! metadata formats resolve, then the whole manifest is installed in one
//! batch so the resolver sees the complete constraint set, then the project
//! itself is installed in editable mode so its entry points register.

use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use crate::common::{self, CommandResult};
use crate::config::ApiConfig;
use crate::environment::EnvironmentDescriptor;
use crate::error::{self, Result};
use crate::manifest::{DependencyManifest, package_name};
use crate::ui;

const PYPI_HOST: (&str, u16) = ("pypi.org", 443);
const NETWORK_TIMEOUT: Duration = Duration::from_secs(10);

/// Install the manifest plus the project into `env`.
///
/// An empty manifest short-circuits: there is nothing for the resolver to
/// see and no reason to touch the network.
pub fn install(
    env: &EnvironmentDescriptor,
    manifest: &DependencyManifest,
    project: &Path,
    api: &ApiConfig,
    debug: bool,
) -> Result<()> {
    if manifest.is_empty() {
        ui::status("manifest has no entries, nothing to install");
        return Ok(());
    }

    check_network()?;
    upgrade_pip(env, debug)?;
    install_manifest(env, manifest, api, debug)?;
    install_project_editable(env, project, debug);

    Ok(())
}

/// TCP reachability preflight against the package index
fn check_network() -> Result<()> {
    let addrs = PYPI_HOST
        .to_socket_addrs()
        .map_err(|e| error::dependency_install_failed("pypi.org", format!("DNS resolution failed: {e}")))?;
    for addr in addrs {
        if TcpStream::connect_timeout(&addr, NETWORK_TIMEOUT).is_ok() {
            return Ok(());
        }
    }
    Err(error::dependency_install_failed(
        "pypi.org",
        "package index unreachable, check internet connection",
    ))
}

fn pip(env: &EnvironmentDescriptor, args: &[&str], debug: bool) -> Result<CommandResult> {
    let mut full: Vec<&str> = vec!["-m", "pip"];
    full.extend_from_slice(args);
    if debug {
        ui::detail(&format!("{} -m pip {}", env.python.display(), args.join(" ")));
    }
    common::run_command(&env.python, &full).map_err(|e| {
        error::dependency_install_failed("pip", format!("failed to run pip: {e}"))
    })
}

/// Upgrade pip before touching the manifest so the resolver understands
/// current wheel and metadata formats.
fn upgrade_pip(env: &EnvironmentDescriptor, debug: bool) -> Result<()> {
    let pb = ui::spinner("upgrading packaging tooling");
    let result = pip(env, &["install", "--upgrade", "pip"], debug);
    pb.finish_and_clear();
    match result {
        Ok(r) if r.success => {
            ui::status("packaging tooling up to date");
            Ok(())
        }
        Ok(r) => {
            // An old-but-working pip can usually still install the manifest
            ui::warn(&format!("pip self-upgrade failed (continuing): {}", brief(r.detail())));
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// Install all manifest entries in one batch, retrying transient failures,
/// then fall back to per-package installs to pin down exactly what failed.
fn install_manifest(
    env: &EnvironmentDescriptor,
    manifest: &DependencyManifest,
    api: &ApiConfig,
    debug: bool,
) -> Result<()> {
    let manifest_path = manifest.path.to_string_lossy().into_owned();
    let attempts = api.max_retries.max(1);

    let mut last_detail = String::new();
    for attempt in 1..=attempts {
        if attempt > 1 {
            ui::status(&format!("retry {attempt}/{attempts} for manifest install"));
            std::thread::sleep(Duration::from_secs_f64(api.retry_delay));
        }
        let pb = ui::spinner(&format!("installing {} pinned dependencies", manifest.len()));
        let result = pip(env, &["install", "-r", &manifest_path], debug)?;
        pb.finish_and_clear();

        if result.success {
            ui::status(&format!("installed {} manifest entries", manifest.len()));
            return Ok(());
        }
        last_detail = result.detail().to_string();
        if let Some(package) = first_unsatisfiable(&last_detail, manifest) {
            // Resolver verdicts don't change on retry
            return Err(error::dependency_install_failed(package, brief(&last_detail)));
        }
    }

    ui::warn("batch install failed, falling back to per-package installs");
    install_per_package(env, manifest, debug, &last_detail)
}

/// Salvage pass: install entries one at a time and report every failure.
/// Batch-first remains the rule; this only runs after the batch failed for
/// a reason that was not attributable to a single entry.
fn install_per_package(
    env: &EnvironmentDescriptor,
    manifest: &DependencyManifest,
    debug: bool,
    batch_detail: &str,
) -> Result<()> {
    let mut failed: Vec<String> = Vec::new();

    for entry in &manifest.entries {
        let pb = ui::spinner(&format!("installing {}", entry.constraint));
        let result = pip(env, &["install", &entry.constraint], debug)?;
        pb.finish_and_clear();
        if result.success {
            ui::status(&format!("installed {}", entry.name));
        } else {
            ui::warn(&format!("failed to install {}", entry.constraint));
            failed.push(entry.constraint.clone());
        }
    }

    if failed.is_empty() {
        // Everything resolved individually even though the batch failed
        ui::warn(&format!(
            "batch install had failed ({}) but all entries installed individually",
            brief(batch_detail)
        ));
        return Ok(());
    }

    Err(error::dependency_install_failed(
        failed[0].clone(),
        format!("unsatisfiable entries: {}", failed.join(", ")),
    ))
}

/// Editable install of the project so its CLI entry points register.
/// The original setup degrades this to a warning when no project metadata
/// exists, and we keep that behavior.
fn install_project_editable(env: &EnvironmentDescriptor, project: &Path, debug: bool) {
    if !project.join("pyproject.toml").exists() && !project.join("setup.py").exists() {
        ui::warn("no pyproject.toml or setup.py, skipping editable project install");
        return;
    }
    let project_str = project.to_string_lossy().into_owned();
    let pb = ui::spinner("installing project in editable mode");
    let result = pip(env, &["install", "-e", &project_str], debug);
    pb.finish_and_clear();
    match result {
        Ok(r) if r.success => ui::status("project installed in editable mode"),
        Ok(r) => ui::warn(&format!(
            "editable project install failed (continuing): {}",
            brief(r.detail())
        )),
        Err(e) => ui::warn(&format!("editable project install failed (continuing): {e}")),
    }
}

/// Pull the first unsatisfiable package out of pip's stderr, matched against
/// the manifest so arbitrary transitive names don't get blamed.
fn first_unsatisfiable(stderr: &str, manifest: &DependencyManifest) -> Option<String> {
    for line in stderr.lines() {
        let Some(needle) = line
            .split_once("Could not find a version that satisfies the requirement ")
            .map(|(_, rest)| rest)
            .or_else(|| {
                line.split_once("No matching distribution found for ")
                    .map(|(_, rest)| rest)
            })
        else {
            continue;
        };
        let token = needle.split_whitespace().next().unwrap_or(needle);
        // Match on the exact package name so a failing transitive dependency
        // (torchvision) is never blamed on a manifest entry it prefixes (torch)
        let token_name = package_name(token);
        for entry in &manifest.entries {
            if entry.name.eq_ignore_ascii_case(&token_name) {
                return Some(entry.constraint.clone());
            }
        }
        return Some(token.trim_end_matches(&[',', ')'][..]).to_string());
    }
    None
}

fn brief(detail: &str) -> String {
    let line = detail
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or(detail);
    line.trim().to_string()
}
