//! Bootstrap command implementation
//!
//! The orchestration pipeline: configuration, platform detection, runtime,
//! virtual environment, dependency install, health validation. Steps run in
//! order and the first fatal error aborts the run; the caller prints the
//! final machine-parseable line and exits non-zero.

use std::path::PathBuf;

use crate::cli::BootstrapArgs;
use crate::config::{self, Config};
use crate::display;
use crate::environment;
use crate::error::{EnvprepError, Result};
use crate::installer;
use crate::manifest::{DependencyManifest, MANIFEST_FILE};
use crate::runtime;
use crate::sysinfo::{OsFamily, SystemInfo};
use crate::{health, ui};

pub fn run(project: Option<PathBuf>, args: BootstrapArgs) -> Result<()> {
    let project = super::project_root(project)?;

    ui::step("config", "loading configuration");
    let mut config = Config::load_or_create(&config::config_path(&project))?;
    config.apply_env();
    if args.debug {
        ui::detail(&format!("log level {}", config.logging.level));
    }

    if args.no_deps_check {
        // Operator asked to trust the environment as-is
        ui::status("dependency preparation skipped (--no-deps-check)");
        println!("Environment assumed ready, handing off");
        return Ok(());
    }

    ui::step("platform", "detecting host platform");
    let info = SystemInfo::detect();
    ui::status(&format!("{info}"));

    ui::step("runtime", "locating Python runtime");
    let runtime = runtime::ensure(&info, !args.skip_runtime_check, args.debug)?;
    ui::status(&format!(
        "{} ({}) at {}",
        runtime.command,
        runtime.version_string(),
        runtime.path.display()
    ));
    if info.family == OsFamily::Windows {
        runtime::strategy::install_vcredist_best_effort(info.family, args.debug);
    }

    // Keeps Xvfb alive until the end of the run
    let _display = start_display_if_headless(&info);

    ui::step("environment", "preparing virtual environment");
    let env = environment::ensure(&project, &runtime, args.force, args.debug)?;
    if args.debug {
        ui::detail(&format!("environment state {:?}", env.state));
    }

    ui::step("dependencies", "installing pinned dependencies");
    let manifest_path = args
        .manifest
        .unwrap_or_else(|| project.join(MANIFEST_FILE));
    let manifest = DependencyManifest::load(&manifest_path)?;
    installer::install(&env, &manifest, &project, &config.api, args.debug)?;

    if args.skip_validation {
        ui::status("health validation skipped (--skip-validation)");
    } else {
        ui::step("health", "validating critical modules");
        let report = health::validate(&env, info.family, args.debug);
        health::print_report(&report);
        if !report.is_green() {
            return Err(EnvprepError::HealthCheckFailed {
                failed: report.failures().join(", "),
            });
        }
    }

    println!("Environment ready at {}", env.root.display());
    Ok(())
}

fn start_display_if_headless(info: &SystemInfo) -> Option<display::DisplayGuard> {
    if !display::headless_requested() {
        return None;
    }
    if !matches!(info.family, OsFamily::LinuxDebian | OsFamily::LinuxRhel) {
        ui::warn("headless display requested but only supported on Linux");
        return None;
    }
    ui::step("display", "starting virtual display");
    display::DisplayGuard::start(&display::display_name())
}
