//! Platform errors

use super::EnvprepError;

pub fn unsupported(detail: impl Into<String>) -> EnvprepError {
    EnvprepError::UnsupportedPlatform {
        detail: detail.into(),
    }
}
