//! Pinned dependency manifest (requirements.txt)
//!
//! The manifest is the source of truth for the dependency installer: an
//! ordered set of version constraints, unique by package name. A missing
//! file is fatal, never defaulted.

use std::path::{Path, PathBuf};

use crate::error::{self, Result};

/// Conventional manifest file name
pub const MANIFEST_FILE: &str = "requirements.txt";

/// One `name<constraint>` line from the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Bare package name, e.g. `numpy`
    pub name: String,
    /// Full constraint as written, e.g. `numpy>=1.24.0`
    pub constraint: String,
}

/// Parsed, validated manifest
#[derive(Debug, Clone)]
pub struct DependencyManifest {
    pub path: PathBuf,
    pub entries: Vec<ManifestEntry>,
}

impl DependencyManifest {
    /// Load and parse the manifest at `path`
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::manifest_missing(path.display().to_string()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| {
            error::manifest_invalid(path.display().to_string(), e.to_string())
        })?;
        Self::parse(path, &text)
    }

    /// Parse manifest text. Comments and blank lines are skipped; duplicate
    /// package names are rejected.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let mut entries: Vec<ManifestEntry> = Vec::new();

        for (lineno, raw) in text.lines().enumerate() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }
            let name = package_name(line);
            if name.is_empty() {
                return Err(error::manifest_invalid(
                    path.display().to_string(),
                    format!("line {}: cannot parse package name from '{}'", lineno + 1, raw),
                ));
            }
            if entries.iter().any(|e| e.name.eq_ignore_ascii_case(&name)) {
                return Err(error::manifest_invalid(
                    path.display().to_string(),
                    format!("duplicate package '{name}'"),
                ));
            }
            entries.push(ManifestEntry {
                name,
                constraint: line.to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Extract the bare package name from a constraint line.
/// Stops at the first version operator, extras bracket, or marker.
pub(crate) fn package_name(line: &str) -> String {
    line.chars()
        .take_while(|c| !matches!(c, '=' | '<' | '>' | '!' | '~' | '[' | ';' | ' ' | '\t'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<DependencyManifest> {
        DependencyManifest::parse(Path::new("requirements.txt"), text)
    }

    #[test]
    fn test_parse_typical_manifest() {
        let m = parse(
            "Pillow>=10.0.0\npyautogui>=0.9.54\nnumpy>=1.24.0\n\n# vision stack\nopencv-python>=4.8.0\n",
        )
        .unwrap();
        assert_eq!(m.len(), 4);
        assert_eq!(m.entries[0].name, "Pillow");
        assert_eq!(m.entries[0].constraint, "Pillow>=10.0.0");
        assert_eq!(m.entries[3].name, "opencv-python");
    }

    #[test]
    fn test_parse_preserves_order() {
        let m = parse("b==1\na==2\nc==3\n").unwrap();
        let names: Vec<_> = m.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_inline_comment_stripped() {
        let m = parse("torch>=2.1.0  # heavy\n").unwrap();
        assert_eq!(m.entries[0].constraint, "torch>=2.1.0");
    }

    #[test]
    fn test_extras_and_markers() {
        let m = parse("uvicorn[standard]>=0.23\nrich>=13.0.0; python_version >= '3.8'\n").unwrap();
        assert_eq!(m.entries[0].name, "uvicorn");
        assert_eq!(m.entries[1].name, "rich");
    }

    #[test]
    fn test_duplicate_rejected_case_insensitive() {
        let err = parse("numpy>=1.24.0\nNumPy==1.26.0\n").unwrap_err();
        assert!(err.to_string().contains("duplicate package 'NumPy'"));
    }

    #[test]
    fn test_unparsable_line_rejected() {
        let err = parse(">=1.0\n").unwrap_err();
        assert!(err.to_string().contains("cannot parse package name"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = DependencyManifest::load(Path::new("/nonexistent/requirements.txt")).unwrap_err();
        assert!(matches!(err, crate::error::EnvprepError::ManifestMissing { .. }));
    }

    #[test]
    fn test_empty_manifest_parses() {
        let m = parse("# nothing pinned yet\n").unwrap();
        assert!(m.is_empty());
    }
}
