//! Virtual environment errors

use super::EnvprepError;

pub fn setup_failed(detail: impl Into<String>) -> EnvprepError {
    EnvprepError::EnvironmentSetupFailed {
        detail: detail.into(),
    }
}
