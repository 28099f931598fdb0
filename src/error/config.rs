//! Configuration errors

use super::EnvprepError;

pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> EnvprepError {
    EnvprepError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> EnvprepError {
    EnvprepError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
