//! Post-install health validation
//!
//! Probes the environment's interpreter for every critical module and
//! resolves expected CLI tools. Validation reports, it never installs:
//! a failed check surfaces in the report and the caller decides whether
//! that is fatal.

use std::collections::BTreeMap;
use std::path::Path;

use crate::common;
use crate::environment::{self, EnvironmentDescriptor};
use crate::sysinfo::OsFamily;
use crate::ui;

/// Modules the agent cannot run without, probed by import
pub const CRITICAL_MODULES: [&str; 13] = [
    "PIL",
    "pyautogui",
    "requests",
    "cv2",
    "numpy",
    "pynput",
    "openai",
    "anthropic",
    "cryptography",
    "pydantic",
    "structlog",
    "rich",
    "yaml",
];

/// CLI tools expected on PATH (or in the environment's bin directory)
pub const EXPECTED_CLIS: [&str; 2] = ["vexis", "pip"];

/// Platform-specific automation bindings, checked in addition to the
/// critical set
pub fn platform_modules(family: OsFamily) -> &'static [&'static str] {
    match family {
        OsFamily::Macos => &["objc"],
        OsFamily::Windows => &["win32api"],
        OsFamily::LinuxDebian | OsFamily::LinuxRhel => &["Xlib"],
        OsFamily::Unknown => &[],
    }
}

/// Result of one full validation pass
#[derive(Debug, Default)]
pub struct HealthReport {
    pub modules: BTreeMap<String, bool>,
    pub clis: BTreeMap<String, bool>,
}

impl HealthReport {
    pub fn is_green(&self) -> bool {
        self.modules.values().all(|ok| *ok) && self.clis.values().all(|ok| *ok)
    }

    /// Names of everything that failed, modules first
    pub fn failures(&self) -> Vec<String> {
        self.modules
            .iter()
            .filter(|(_, ok)| !**ok)
            .map(|(name, _)| name.clone())
            .chain(
                self.clis
                    .iter()
                    .filter(|(_, ok)| !**ok)
                    .map(|(name, _)| format!("{name} (cli)")),
            )
            .collect()
    }
}

/// Run the full validation pass. Individual probe failures land in the
/// report; this function itself does not fail.
pub fn validate(env: &EnvironmentDescriptor, family: OsFamily, debug: bool) -> HealthReport {
    let mut report = HealthReport::default();

    for module in CRITICAL_MODULES {
        report
            .modules
            .insert(module.to_string(), probe_import(env, module, debug));
    }
    for module in platform_modules(family) {
        report
            .modules
            .insert((*module).to_string(), probe_import(env, module, debug));
    }
    for cli in EXPECTED_CLIS {
        report.clis.insert(cli.to_string(), resolve_cli(env, cli));
    }

    report
}

/// Print one line per probe, matching the rest of the bootstrap output
pub fn print_report(report: &HealthReport) {
    for (module, ok) in &report.modules {
        if *ok {
            ui::status(&format!("module {module}"));
        } else {
            ui::warn(&format!("module {module} failed to import"));
        }
    }
    for (cli, ok) in &report.clis {
        if *ok {
            ui::status(&format!("cli {cli}"));
        } else {
            ui::warn(&format!("cli {cli} not found"));
        }
    }
}

fn probe_import(env: &EnvironmentDescriptor, module: &str, debug: bool) -> bool {
    let snippet = format!("import {module}");
    if debug {
        ui::detail(&format!("probing {snippet}"));
    }
    matches!(
        common::run_command(&env.python, &["-c", &snippet]),
        Ok(result) if result.success
    )
}

/// A CLI counts as present when it lives in the environment's bin
/// directory or resolves on PATH.
fn resolve_cli(env: &EnvironmentDescriptor, name: &str) -> bool {
    in_bin_dir(&env.root, name) || common::which(name).is_some()
}

fn in_bin_dir(root: &Path, name: &str) -> bool {
    let bin = environment::bin_dir(root);
    if bin.join(name).is_file() {
        return true;
    }
    if cfg!(windows) {
        for ext in ["exe", "cmd", "bat"] {
            if bin.join(format!("{name}.{ext}")).is_file() {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report_is_green() {
        assert!(HealthReport::default().is_green());
    }

    #[test]
    fn test_any_failure_breaks_green() {
        let mut report = HealthReport::default();
        report.modules.insert("numpy".into(), true);
        report.modules.insert("pynput".into(), false);
        assert!(!report.is_green());
        assert_eq!(report.failures(), ["pynput"]);
    }

    #[test]
    fn test_cli_failures_are_labeled() {
        let mut report = HealthReport::default();
        report.clis.insert("vexis".into(), false);
        assert_eq!(report.failures(), ["vexis (cli)"]);
    }

    #[test]
    fn test_platform_modules_per_family() {
        assert_eq!(platform_modules(OsFamily::Macos), ["objc"]);
        assert_eq!(platform_modules(OsFamily::Windows), ["win32api"]);
        assert_eq!(platform_modules(OsFamily::LinuxDebian), ["Xlib"]);
        assert_eq!(platform_modules(OsFamily::LinuxRhel), ["Xlib"]);
        assert!(platform_modules(OsFamily::Unknown).is_empty());
    }

    #[test]
    fn test_critical_set_covers_gui_and_ai_stack() {
        assert!(CRITICAL_MODULES.contains(&"pyautogui"));
        assert!(CRITICAL_MODULES.contains(&"anthropic"));
        assert!(CRITICAL_MODULES.contains(&"openai"));
    }
}
