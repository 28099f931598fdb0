//! Platform-specific runtime install strategies
//!
//! Each strategy implements one capability: attempt an interpreter install
//! and report success or failure. The chains are ordered and iterated
//! generically by [`crate::runtime::ensure`]; a failing strategy falls
//! through to the next, and exhausting the chain is fatal.

use crate::common;
use crate::error::{self, Result};
use crate::sysinfo::OsFamily;
use crate::ui;

/// Pinned python.org installer used by the Windows direct-download fallback
const WINDOWS_INSTALLER_URL: &str =
    "https://www.python.org/ftp/python/3.12.8/python-3.12.8-amd64.exe";

const HOMEBREW_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";

/// One way of getting a Python interpreter onto the host
pub trait InstallStrategy {
    fn name(&self) -> &'static str;

    /// Attempt the install once. `Err` carries the reason for the fallthrough.
    fn attempt(&self, debug: bool) -> std::result::Result<(), String>;
}

/// Ordered strategy chain for the detected platform family.
///
/// `Unknown` has no chain: guessing a package manager on an unidentified
/// host is exactly the ambiguity this module exists to avoid.
pub fn strategies_for(family: OsFamily) -> Result<Vec<Box<dyn InstallStrategy>>> {
    match family {
        OsFamily::Windows => Ok(vec![
            Box::new(Winget),
            Box::new(Chocolatey),
            Box::new(DirectDownload),
        ]),
        OsFamily::Macos => Ok(vec![Box::new(Homebrew)]),
        OsFamily::LinuxDebian => Ok(vec![Box::new(Apt)]),
        OsFamily::LinuxRhel => Ok(vec![Box::new(Dnf)]),
        OsFamily::Unknown => Err(error::unsupported_platform(
            "cannot choose a package manager for an unrecognized OS; install Python 3.8+ manually",
        )),
    }
}

fn run_step(
    debug: bool,
    program: &str,
    args: &[&str],
) -> std::result::Result<(), String> {
    let path = common::which(program).ok_or_else(|| format!("'{program}' not found on PATH"))?;
    if debug {
        ui::detail(&format!("running {} {}", program, args.join(" ")));
    }
    let result = common::run_command(&path, args).map_err(|e| e.to_string())?;
    if result.success {
        Ok(())
    } else {
        Err(truncate(result.detail()))
    }
}

fn truncate(detail: &str) -> String {
    const MAX: usize = 300;
    let line = detail.lines().last().unwrap_or(detail);
    if line.len() <= MAX {
        return line.to_string();
    }
    // Installer output is not guaranteed ASCII; cut on a char boundary
    let mut end = MAX;
    while !line.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &line[..end])
}

pub struct Winget;

impl InstallStrategy for Winget {
    fn name(&self) -> &'static str {
        "winget"
    }

    fn attempt(&self, debug: bool) -> std::result::Result<(), String> {
        run_step(
            debug,
            "winget",
            &[
                "install",
                "--id",
                "Python.Python.3.12",
                "--silent",
                "--accept-package-agreements",
                "--accept-source-agreements",
            ],
        )
    }
}

pub struct Chocolatey;

impl InstallStrategy for Chocolatey {
    fn name(&self) -> &'static str {
        "chocolatey"
    }

    fn attempt(&self, debug: bool) -> std::result::Result<(), String> {
        run_step(debug, "choco", &["install", "python3", "-y", "--no-progress"])
    }
}

/// Last-resort Windows path: fetch the python.org installer and run it
/// silently. Uses curl.exe, which ships with Windows 10+.
pub struct DirectDownload;

impl InstallStrategy for DirectDownload {
    fn name(&self) -> &'static str {
        "direct-download"
    }

    fn attempt(&self, debug: bool) -> std::result::Result<(), String> {
        let staging = tempfile::tempdir().map_err(|e| e.to_string())?;
        let installer = staging.path().join("python-installer.exe");
        let installer_str = installer.to_string_lossy().into_owned();

        run_step(
            debug,
            "curl",
            &["-fsSL", "-o", &installer_str, WINDOWS_INSTALLER_URL],
        )?;

        if debug {
            ui::detail(&format!("running silent installer {installer_str}"));
        }
        let result = common::run_command(
            &installer,
            &["/quiet", "InstallAllUsers=0", "PrependPath=1", "Include_test=0"],
        )
        .map_err(|e| e.to_string())?;
        if result.success {
            Ok(())
        } else {
            Err(truncate(result.detail()))
        }
    }
}

/// Homebrew formula install, bootstrapping Homebrew itself when absent
pub struct Homebrew;

impl InstallStrategy for Homebrew {
    fn name(&self) -> &'static str {
        "homebrew"
    }

    fn attempt(&self, debug: bool) -> std::result::Result<(), String> {
        if common::which("brew").is_none() {
            ui::status("Homebrew not found, bootstrapping it first");
            let script = format!("curl -fsSL {HOMEBREW_INSTALL_URL} | NONINTERACTIVE=1 bash");
            run_step(debug, "bash", &["-c", &script])?;
            if common::which("brew").is_none() {
                return Err("Homebrew bootstrap completed but 'brew' is still not on PATH".into());
            }
        }
        run_step(debug, "brew", &["install", "python@3.12"])
    }
}

pub struct Apt;

impl InstallStrategy for Apt {
    fn name(&self) -> &'static str {
        "apt-get"
    }

    fn attempt(&self, debug: bool) -> std::result::Result<(), String> {
        run_step(debug, "apt-get", &["update", "-qq"])?;
        run_step(
            debug,
            "apt-get",
            &["install", "-y", "python3", "python3-venv", "python3-pip"],
        )
    }
}

pub struct Dnf;

impl InstallStrategy for Dnf {
    fn name(&self) -> &'static str {
        "dnf"
    }

    fn attempt(&self, debug: bool) -> std::result::Result<(), String> {
        run_step(debug, "dnf", &["install", "-y", "python3", "python3-pip"])
    }
}

/// Best-effort install of the VC++ runtime redistributable some wheels need
/// on Windows. Failure is a warning, never an abort.
pub fn install_vcredist_best_effort(family: OsFamily, debug: bool) {
    if family != OsFamily::Windows {
        return;
    }
    match run_step(
        debug,
        "winget",
        &[
            "install",
            "--id",
            "Microsoft.VCRedist.2015+.x64",
            "--silent",
            "--accept-package-agreements",
            "--accept-source-agreements",
        ],
    ) {
        Ok(()) => ui::status("VC++ redistributable present"),
        Err(reason) => ui::warn(&format!(
            "optional VC++ redistributable install failed (continuing): {reason}"
        )),
    }
}
