//! Command implementations
//!
//! Each command module exposes a single `run` entry point taking its parsed
//! arguments. The bootstrap command owns the orchestration pipeline; the
//! rest are thin.

pub mod bootstrap;
pub mod completions;
pub mod doctor;
pub mod purge;
pub mod version;

use std::path::PathBuf;

/// Resolve the project root from the global flag or the working directory
pub fn project_root(flag: Option<PathBuf>) -> crate::error::Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(crate::error::EnvprepError::from),
    }
}
