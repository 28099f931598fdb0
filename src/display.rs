//! Headless X display management (Linux)
//!
//! GUI-automation modules refuse to import without a display server. When
//! headless mode is requested, a virtual framebuffer is started for the
//! duration of the bootstrap and torn down on drop.

use std::process::{Child, Command, Stdio};
use std::time::Duration;

use crate::ui;

const DEFAULT_DISPLAY: &str = ":99";
const STARTUP_WAIT: Duration = Duration::from_secs(1);

/// A running Xvfb instance, killed on drop
pub struct DisplayGuard {
    child: Child,
}

impl DisplayGuard {
    /// Start Xvfb on `display`. Returns `None` with a warning when Xvfb is
    /// unavailable or dies immediately; the bootstrap continues and import
    /// probes for GUI modules will simply fail in the health report.
    pub fn start(display: &str) -> Option<Self> {
        let spawned = Command::new("Xvfb")
            .args([display, "-screen", "0", "1920x1080x24"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                ui::warn(&format!("could not start Xvfb (continuing without display): {e}"));
                return None;
            }
        };

        std::thread::sleep(STARTUP_WAIT);
        match child.try_wait() {
            Ok(None) => {
                // Interpreter subprocesses inherit DISPLAY from here on.
                // SAFETY: called from the single-threaded bootstrap path.
                unsafe { std::env::set_var("DISPLAY", display) };
                ui::status(&format!("virtual display running on {display}"));
                Some(Self { child })
            }
            Ok(Some(status)) => {
                ui::warn(&format!(
                    "Xvfb exited immediately with {status} (continuing without display)"
                ));
                None
            }
            Err(e) => {
                ui::warn(&format!("could not check Xvfb status: {e}"));
                let _ = child.kill();
                None
            }
        }
    }
}

impl Drop for DisplayGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// True when the operator asked for a virtual display
pub fn headless_requested() -> bool {
    std::env::var("ENVPREP_HEADLESS")
        .map(|v| {
            let v = v.trim().to_ascii_lowercase();
            matches!(v.as_str(), "1" | "true" | "yes" | "on")
        })
        .unwrap_or(false)
}

/// Display to use for headless mode, ENVPREP_DISPLAY or `:99`
pub fn display_name() -> String {
    std::env::var("ENVPREP_DISPLAY")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DISPLAY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_var(key: &str, value: &str) {
        // SAFETY: tests in this module are serialized
        unsafe { std::env::set_var(key, value) };
    }

    fn remove_var(key: &str) {
        // SAFETY: tests in this module are serialized
        unsafe { std::env::remove_var(key) };
    }

    #[test]
    #[serial]
    fn test_headless_requested_truthy_values() {
        for value in ["1", "true", "YES", "on"] {
            set_var("ENVPREP_HEADLESS", value);
            assert!(headless_requested(), "{value} should enable headless mode");
        }
        for value in ["0", "false", "", "no"] {
            set_var("ENVPREP_HEADLESS", value);
            assert!(!headless_requested(), "{value} should not enable headless mode");
        }
        remove_var("ENVPREP_HEADLESS");
        assert!(!headless_requested());
    }

    #[test]
    #[serial]
    fn test_display_name_default_and_override() {
        remove_var("ENVPREP_DISPLAY");
        assert_eq!(display_name(), ":99");
        set_var("ENVPREP_DISPLAY", ":42");
        assert_eq!(display_name(), ":42");
        remove_var("ENVPREP_DISPLAY");
    }
}
