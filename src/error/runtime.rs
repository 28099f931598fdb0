//! Python runtime errors

use super::EnvprepError;

pub fn unavailable(detail: impl Into<String>) -> EnvprepError {
    EnvprepError::RuntimeUnavailable {
        detail: detail.into(),
    }
}
