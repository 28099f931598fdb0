//! Host platform detection
//!
//! Produces a [`SystemInfo`] once per run with no side effects. Linux family
//! detection parses `/etc/os-release`; macOS queries `sw_vers`; Windows is
//! identified at compile target level with the version taken from `cmd /c ver`.
//! Anything else maps to [`OsFamily::Unknown`] and downstream steps that need
//! a package manager must fail explicitly instead of guessing.

use std::fmt;

/// Operating system family, at the granularity package-manager selection needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    LinuxDebian,
    LinuxRhel,
    Macos,
    Windows,
    Unknown,
}

impl OsFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::LinuxDebian => "linux-debian",
            OsFamily::LinuxRhel => "linux-rhel",
            OsFamily::Macos => "macos",
            OsFamily::Windows => "windows",
            OsFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable host description, computed once per run
#[derive(Debug, Clone)]
pub struct SystemInfo {
    pub family: OsFamily,
    pub version: String,
    pub arch: String,
}

impl SystemInfo {
    /// Detect the host platform. Never fails; unrecognized hosts come back
    /// as `Unknown` and are rejected later only where it matters.
    pub fn detect() -> SystemInfo {
        let (family, version) = detect_family_and_version();
        SystemInfo {
            family,
            version,
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}

impl fmt::Display for SystemInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.family, self.version, self.arch)
    }
}

#[cfg(target_os = "linux")]
fn detect_family_and_version() -> (OsFamily, String) {
    match std::fs::read_to_string("/etc/os-release") {
        Ok(text) => (
            family_from_os_release(&text),
            version_from_os_release(&text).unwrap_or_else(|| "unknown".to_string()),
        ),
        Err(_) => (OsFamily::Unknown, "unknown".to_string()),
    }
}

#[cfg(target_os = "macos")]
fn detect_family_and_version() -> (OsFamily, String) {
    let version = crate::common::run_command("sw_vers", &["-productVersion"])
        .ok()
        .filter(|r| r.success)
        .map(|r| r.stdout.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    (OsFamily::Macos, version)
}

#[cfg(target_os = "windows")]
fn detect_family_and_version() -> (OsFamily, String) {
    let version = crate::common::run_command("cmd", &["/c", "ver"])
        .ok()
        .filter(|r| r.success)
        .map(|r| r.stdout.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    (OsFamily::Windows, version)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn detect_family_and_version() -> (OsFamily, String) {
    (OsFamily::Unknown, "unknown".to_string())
}

/// Classify a Linux distribution from os-release `ID` and `ID_LIKE` fields
pub fn family_from_os_release(text: &str) -> OsFamily {
    let id = os_release_field(text, "ID").unwrap_or_default();
    let id_like = os_release_field(text, "ID_LIKE").unwrap_or_default();
    let haystack = format!("{id} {id_like}").to_lowercase();

    let debian = ["debian", "ubuntu", "mint", "raspbian"];
    let rhel = ["rhel", "centos", "fedora", "rocky", "almalinux"];

    if debian.iter().any(|d| haystack.split_whitespace().any(|w| w == *d)) {
        OsFamily::LinuxDebian
    } else if rhel.iter().any(|r| haystack.split_whitespace().any(|w| w == *r)) {
        OsFamily::LinuxRhel
    } else {
        OsFamily::Unknown
    }
}

/// Extract `VERSION_ID` from os-release text
pub fn version_from_os_release(text: &str) -> Option<String> {
    os_release_field(text, "VERSION_ID")
}

fn os_release_field(text: &str, field: &str) -> Option<String> {
    text.lines().find_map(|line| {
        let rest = line.strip_prefix(field)?.strip_prefix('=')?;
        Some(rest.trim().trim_matches('"').to_string())
    })
}
