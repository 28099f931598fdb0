//! Dependency manifest and install errors

use super::EnvprepError;

pub fn install_failed(package: impl Into<String>, detail: impl Into<String>) -> EnvprepError {
    EnvprepError::DependencyInstallFailed {
        package: package.into(),
        detail: detail.into(),
    }
}

pub fn manifest_missing(path: impl Into<String>) -> EnvprepError {
    EnvprepError::ManifestMissing { path: path.into() }
}

pub fn manifest_invalid(path: impl Into<String>, reason: impl Into<String>) -> EnvprepError {
    EnvprepError::ManifestInvalid {
        path: path.into(),
        reason: reason.into(),
    }
}
