//! Virtual environment lifecycle
//!
//! State is re-derived on every run by probing the environment through its
//! own interpreter; an existing-but-broken directory is never mistaken for a
//! valid environment. Transitions: Absent → create → Valid; Corrupt →
//! delete + create → Valid; Valid → no-op.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::common;
use crate::error::{self, Result};
use crate::runtime::RuntimeDescriptor;
use crate::ui;

/// Conventional environment directory created by bootstrap
pub const ENV_DIR: &str = "venv";

/// Every environment directory name that has historically been in use,
/// covered by the purge operation.
pub const ENV_ALIASES: [&str; 5] = ["venv", ".venv", "env", ".env", "virtualenv"];

/// Canonical probe executed through the environment's interpreter
const PROBE_SNIPPET: &str = "import sys; print(sys.prefix)";

/// Derived environment state; never cached across runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvState {
    Absent,
    Corrupt,
    Valid,
}

/// A probed environment bound to the runtime that (re)created it
#[derive(Debug, Clone)]
pub struct EnvironmentDescriptor {
    pub root: PathBuf,
    pub state: EnvState,
    pub python: PathBuf,
}

/// Interpreter path inside an environment root
pub fn interpreter_path(root: &Path) -> PathBuf {
    if cfg!(windows) {
        root.join("Scripts").join("python.exe")
    } else {
        root.join("bin").join("python")
    }
}

/// Executable directory inside an environment root
pub fn bin_dir(root: &Path) -> PathBuf {
    if cfg!(windows) {
        root.join("Scripts")
    } else {
        root.join("bin")
    }
}

/// Probe an environment root and classify it.
///
/// A directory only counts as Valid when its own interpreter runs the
/// canonical probe successfully; existence alone proves nothing.
pub fn probe(root: &Path) -> EnvState {
    if !root.is_dir() {
        return EnvState::Absent;
    }
    let python = interpreter_path(root);
    if !python.exists() {
        return EnvState::Corrupt;
    }
    match common::run_command(&python, &["-c", PROBE_SNIPPET]) {
        Ok(result) if result.success => EnvState::Valid,
        _ => EnvState::Corrupt,
    }
}

/// Ensure a Valid environment at `<project>/venv`, creating or recreating as
/// the probed state requires. `force` recreates even a Valid environment.
pub fn ensure(
    project: &Path,
    runtime: &RuntimeDescriptor,
    force: bool,
    debug: bool,
) -> Result<EnvironmentDescriptor> {
    let root = project.join(ENV_DIR);
    let state = probe(&root);

    match state {
        EnvState::Valid if !force => {
            ui::status(&format!("environment at {} is valid", root.display()));
            return Ok(EnvironmentDescriptor {
                python: interpreter_path(&root),
                root,
                state: EnvState::Valid,
            });
        }
        EnvState::Valid => {
            ui::status("recreating valid environment (--force)");
            remove_root(&root)?;
        }
        EnvState::Corrupt => {
            ui::warn(&format!(
                "environment at {} failed its interpreter probe, recreating",
                root.display()
            ));
            remove_root(&root)?;
        }
        EnvState::Absent => {
            if debug {
                ui::detail(&format!("no environment at {}", root.display()));
            }
        }
    }

    create(&root, runtime)?;

    // Re-probe: the venv module exiting zero is not proof of a working env
    match probe(&root) {
        EnvState::Valid => Ok(EnvironmentDescriptor {
            python: interpreter_path(&root),
            root,
            state: EnvState::Valid,
        }),
        _ => Err(error::environment_setup_failed(format!(
            "freshly created environment at {} failed its interpreter probe",
            root.display()
        ))),
    }
}

fn remove_root(root: &Path) -> Result<()> {
    std::fs::remove_dir_all(root).map_err(|e| {
        error::environment_setup_failed(format!("failed to delete {}: {}", root.display(), e))
    })
}

fn create(root: &Path, runtime: &RuntimeDescriptor) -> Result<()> {
    ui::status(&format!(
        "creating environment at {} with Python {}",
        root.display(),
        runtime.version_string()
    ));
    let root_str = root.to_string_lossy().into_owned();
    let result = common::run_command(&runtime.path, &["-m", "venv", &root_str])
        .map_err(|e| error::environment_setup_failed(format!("failed to run venv: {e}")))?;
    if result.success {
        Ok(())
    } else {
        Err(error::environment_setup_failed(format!(
            "venv creation exited non-zero: {}",
            result.detail()
        )))
    }
}

/// Outcome of the destructive purge scan
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl PurgeOutcome {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Remove every conventional environment directory alias plus `*.egg-info`
/// build-artifact directories under the project root.
///
/// Individual deletion failures are collected and reported at the end; the
/// scan continues to the next match rather than failing fast.
pub fn purge(project: &Path) -> PurgeOutcome {
    let mut outcome = PurgeOutcome::default();

    for alias in ENV_ALIASES {
        let path = project.join(alias);
        if path.is_dir() {
            delete_into(path, &mut outcome);
        }
    }

    for entry in WalkDir::new(project)
        .max_depth(2)
        .into_iter()
        .filter_map(std::result::Result::ok)
    {
        let path = entry.path();
        if entry.file_type().is_dir()
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(".egg-info"))
        {
            delete_into(path.to_path_buf(), &mut outcome);
        }
    }

    outcome
}

fn delete_into(path: PathBuf, outcome: &mut PurgeOutcome) {
    match std::fs::remove_dir_all(&path) {
        Ok(()) => outcome.removed.push(path),
        Err(e) => outcome.failed.push((path, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_probe_absent() {
        let temp = TempDir::new().unwrap();
        assert_eq!(probe(&temp.path().join("venv")), EnvState::Absent);
    }

    #[test]
    fn test_probe_directory_without_interpreter_is_corrupt() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("venv");
        std::fs::create_dir_all(&root).unwrap();
        // Existing directory with no interpreter must never classify as Valid
        assert_eq!(probe(&root), EnvState::Corrupt);
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_broken_interpreter_is_corrupt() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("venv");
        let bin = root.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let python = bin.join("python");
        std::fs::write(&python, "#!/bin/sh\nexit 1\n").unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(probe(&root), EnvState::Corrupt);
    }

    #[cfg(unix)]
    #[test]
    fn test_probe_working_interpreter_is_valid() {
        use std::os::unix::fs::PermissionsExt;
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("venv");
        let bin = root.join("bin");
        std::fs::create_dir_all(&bin).unwrap();
        let python = bin.join("python");
        std::fs::write(&python, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&python, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(probe(&root), EnvState::Valid);
    }

    #[test]
    fn test_purge_removes_all_aliases_and_egg_info() {
        let temp = TempDir::new().unwrap();
        for name in ["venv", ".venv", "env"] {
            std::fs::create_dir_all(temp.path().join(name).join("bin")).unwrap();
        }
        std::fs::create_dir_all(temp.path().join("vexis_agent.egg-info")).unwrap();
        std::fs::create_dir_all(temp.path().join("src")).unwrap();
        std::fs::write(temp.path().join("src/keep.py"), "").unwrap();

        let outcome = purge(temp.path());

        assert!(outcome.is_clean());
        assert_eq!(outcome.removed.len(), 4);
        assert!(!temp.path().join("venv").exists());
        assert!(!temp.path().join(".venv").exists());
        assert!(!temp.path().join("env").exists());
        assert!(!temp.path().join("vexis_agent.egg-info").exists());
        // Unrelated directories are untouched
        assert!(temp.path().join("src/keep.py").exists());
    }

    #[test]
    fn test_purge_empty_project() {
        let temp = TempDir::new().unwrap();
        let outcome = purge(temp.path());
        assert!(outcome.is_clean());
        assert!(outcome.removed.is_empty());
    }

    #[test]
    fn test_interpreter_path_layout() {
        let root = Path::new("/tmp/venv");
        let p = interpreter_path(root);
        if cfg!(windows) {
            assert!(p.ends_with("Scripts/python.exe"));
        } else {
            assert!(p.ends_with("bin/python"));
        }
    }
}
