//! Doctor command implementation
//!
//! A read-only pass over everything bootstrap would check: platform,
//! runtime, environment state, manifest presence, health probes. Changes
//! nothing, and exits non-zero with the first failing check's own error so
//! the final log line is tagged with the step that actually failed.

use std::path::PathBuf;

use crate::cli::DoctorArgs;
use crate::environment::{self, EnvState, EnvironmentDescriptor};
use crate::error::{self, EnvprepError, Result};
use crate::manifest::MANIFEST_FILE;
use crate::runtime;
use crate::sysinfo::SystemInfo;
use crate::{health, ui};

pub fn run(project: Option<PathBuf>, args: DoctorArgs) -> Result<()> {
    let project = super::project_root(project)?;
    let mut failures: Vec<EnvprepError> = Vec::new();

    ui::step("platform", "detecting host platform");
    let info = SystemInfo::detect();
    ui::status(&format!("{info}"));

    ui::step("runtime", "locating Python runtime");
    match runtime::locate(true) {
        Some(rt) => ui::status(&format!(
            "{} ({}) at {}",
            rt.command,
            rt.version_string(),
            rt.path.display()
        )),
        None => {
            ui::warn("no Python 3.8+ interpreter on PATH");
            failures.push(error::runtime_unavailable(
                "no Python 3.8+ interpreter on PATH",
            ));
        }
    }

    ui::step("environment", "probing virtual environment");
    let root = project.join(environment::ENV_DIR);
    let state = environment::probe(&root);
    match state {
        EnvState::Valid => ui::status(&format!("{} is valid", root.display())),
        EnvState::Corrupt => {
            ui::warn(&format!("{} failed its interpreter probe", root.display()));
            failures.push(error::environment_setup_failed(format!(
                "{} failed its interpreter probe",
                root.display()
            )));
        }
        EnvState::Absent => {
            ui::warn(&format!("no environment at {}", root.display()));
            failures.push(error::environment_setup_failed(format!(
                "no environment at {}",
                root.display()
            )));
        }
    }

    ui::step("dependencies", "checking manifest");
    let manifest_path = project.join(MANIFEST_FILE);
    if manifest_path.is_file() {
        ui::status(&format!("{} present", manifest_path.display()));
    } else {
        ui::warn(&format!("{} missing", manifest_path.display()));
        failures.push(error::manifest_missing(manifest_path.display().to_string()));
    }

    if state == EnvState::Valid {
        ui::step("health", "probing critical modules");
        let env = EnvironmentDescriptor {
            python: environment::interpreter_path(&root),
            root,
            state,
        };
        let report = health::validate(&env, info.family, args.debug);
        health::print_report(&report);
        if !report.is_green() {
            failures.push(EnvprepError::HealthCheckFailed {
                failed: report.failures().join(", "),
            });
        }
    }

    match failures.into_iter().next() {
        None => {
            ui::step("doctor", "host is ready");
            Ok(())
        }
        Some(err) => Err(err),
    }
}
