//! Shared process and path helpers used across bootstrap steps

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Captured result of a finished subprocess
pub struct CommandResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// stderr if non-empty, otherwise stdout (installers differ in where they complain)
    pub fn detail(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        }
    }
}

/// Run a command to completion with captured output.
///
/// Returns `Err` only when the process could not be spawned at all;
/// a non-zero exit is reported through `CommandResult::success`.
pub fn run_command(program: impl AsRef<Path>, args: &[&str]) -> std::io::Result<CommandResult> {
    let output = Command::new(program.as_ref())
        .args(args)
        .stdin(Stdio::null())
        .output()?;
    Ok(CommandResult::from_output(output))
}

/// Resolve a command name against PATH, like `which`/`where`.
pub fn which(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        for candidate in candidate_names(name) {
            let full = dir.join(&candidate);
            if is_executable(&full) {
                return Some(full);
            }
        }
    }
    None
}

#[cfg(windows)]
fn candidate_names(name: &str) -> Vec<String> {
    if name.contains('.') {
        vec![name.to_string()]
    } else {
        vec![format!("{name}.exe"), format!("{name}.cmd"), format!("{name}.bat")]
    }
}

#[cfg(not(windows))]
fn candidate_names(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.is_file()
        && std::fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}
