//! Error types and handling for envprep
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`platform`]: Platform detection errors
//! - [`runtime`]: Python runtime errors
//! - [`environment`]: Virtual environment errors
//! - [`deps`]: Dependency manifest and install errors
//! - [`config`]: Configuration file errors

pub mod config;
pub mod deps;
pub mod environment;
pub mod platform;
pub mod runtime;

#[allow(unused_imports)]
pub use config::{parse_failed as config_parse_failed, read_failed as config_read_failed};
#[allow(unused_imports)]
pub use deps::{
    install_failed as dependency_install_failed, manifest_invalid, manifest_missing,
};
#[allow(unused_imports)]
pub use environment::setup_failed as environment_setup_failed;
#[allow(unused_imports)]
pub use platform::unsupported as unsupported_platform;
#[allow(unused_imports)]
pub use runtime::unavailable as runtime_unavailable;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for envprep operations
#[derive(Error, Diagnostic, Debug)]
pub enum EnvprepError {
    // Platform errors
    #[error("Unsupported platform: {detail}")]
    #[diagnostic(
        code(envprep::platform::unsupported),
        help("Supported platforms: Debian/Ubuntu, RHEL/Fedora, macOS, Windows")
    )]
    UnsupportedPlatform { detail: String },

    // Runtime errors
    #[error("No usable Python runtime: {detail}")]
    #[diagnostic(
        code(envprep::runtime::unavailable),
        help("Install Python 3.8 or newer and re-run, or check PATH")
    )]
    RuntimeUnavailable { detail: String },

    // Environment errors
    #[error("Virtual environment setup failed: {detail}")]
    #[diagnostic(code(envprep::environment::setup_failed))]
    EnvironmentSetupFailed { detail: String },

    // Dependency errors
    #[error("Dependency install failed for '{package}': {detail}")]
    #[diagnostic(
        code(envprep::deps::install_failed),
        help("Check network connectivity and that the version constraint is satisfiable")
    )]
    DependencyInstallFailed { package: String, detail: String },

    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(envprep::deps::manifest_missing),
        help("A requirements.txt with pinned constraints is required input")
    )]
    ManifestMissing { path: String },

    #[error("Invalid dependency manifest: {path}: {reason}")]
    #[diagnostic(code(envprep::deps::manifest_invalid))]
    ManifestInvalid { path: String, reason: String },

    // Health errors
    #[error("Environment health check failed: {failed}")]
    #[diagnostic(
        code(envprep::health::check_failed),
        help("Re-run 'envprep bootstrap --force' to rebuild the environment")
    )]
    HealthCheckFailed { failed: String },

    // Configuration errors
    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(envprep::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(envprep::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(envprep::fs::io_error))]
    IoError { message: String },
}

impl EnvprepError {
    /// Name of the bootstrap step this error belongs to, used for the
    /// machine-parseable final log line.
    pub fn step(&self) -> &'static str {
        match self {
            EnvprepError::UnsupportedPlatform { .. } => "platform",
            EnvprepError::RuntimeUnavailable { .. } => "runtime",
            EnvprepError::EnvironmentSetupFailed { .. } => "environment",
            EnvprepError::DependencyInstallFailed { .. }
            | EnvprepError::ManifestMissing { .. }
            | EnvprepError::ManifestInvalid { .. } => "dependencies",
            EnvprepError::HealthCheckFailed { .. } => "health",
            EnvprepError::ConfigReadFailed { .. } | EnvprepError::ConfigParseFailed { .. } => {
                "config"
            }
            EnvprepError::IoError { .. } => "io",
        }
    }
}

impl From<std::io::Error> for EnvprepError {
    fn from(err: std::io::Error) -> Self {
        EnvprepError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for EnvprepError {
    fn from(err: serde_yaml::Error) -> Self {
        EnvprepError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EnvprepError {
    fn from(err: serde_json::Error) -> Self {
        EnvprepError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for EnvprepError {
    fn from(err: inquire::InquireError) -> Self {
        EnvprepError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, EnvprepError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_error_display() {
        let err = EnvprepError::RuntimeUnavailable {
            detail: "no candidate on PATH".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No usable Python runtime: no candidate on PATH"
        );
    }

    #[test]
    fn test_error_code() {
        let err = EnvprepError::ManifestMissing {
            path: "requirements.txt".to_string(),
        };
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("envprep::deps::manifest_missing".to_string())
        );
    }

    #[test]
    fn test_step_names() {
        assert_eq!(unsupported_platform("alpine").step(), "platform");
        assert_eq!(runtime_unavailable("none found").step(), "runtime");
        assert_eq!(environment_setup_failed("venv exited 1").step(), "environment");
        assert_eq!(manifest_missing("requirements.txt").step(), "dependencies");
        assert_eq!(
            dependency_install_failed("numpy", "no matching distribution").step(),
            "dependencies"
        );
        assert_eq!(
            EnvprepError::HealthCheckFailed {
                failed: "cv2".to_string()
            }
            .step(),
            "health"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EnvprepError = io_err.into();
        assert!(matches!(err, EnvprepError::IoError { .. }));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: yaml: content: [unclosed";
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str(yaml_str);
        let yaml_err = parse_result.unwrap_err();
        let err: EnvprepError = yaml_err.into();
        assert!(matches!(err, EnvprepError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("not json");
        let json_err = parse_result.unwrap_err();
        let err: EnvprepError = json_err.into();
        assert!(matches!(err, EnvprepError::ConfigParseFailed { .. }));
    }

    test_error_contains!(
        test_unsupported_platform_error,
        unsupported_platform("unknown Linux distribution"),
        "Unsupported platform",
        "unknown Linux distribution"
    );

    test_error_contains!(
        test_runtime_unavailable_error,
        runtime_unavailable("all install strategies exhausted"),
        "No usable Python runtime"
    );

    test_error_contains!(
        test_environment_setup_failed_error,
        environment_setup_failed("interpreter probe failed after recreation"),
        "Virtual environment setup failed"
    );

    test_error_contains!(
        test_dependency_install_failed_error,
        dependency_install_failed("torch>=2.1.0", "no matching distribution"),
        "Dependency install failed",
        "torch>=2.1.0"
    );

    test_error_contains!(
        test_manifest_invalid_error,
        manifest_invalid("requirements.txt", "duplicate package 'numpy'"),
        "Invalid dependency manifest",
        "duplicate package 'numpy'"
    );

    test_error_contains!(
        test_config_read_failed_error,
        config_read_failed("config.yaml", "permission denied"),
        "Failed to read configuration file"
    );
}
