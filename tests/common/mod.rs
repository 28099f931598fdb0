//! Common test utilities for envprep integration tests

use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway project directory for integration tests
#[allow(dead_code)]
pub struct TestProject {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to the project root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestProject {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file under the project root
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, path: &str) -> PathBuf {
        let dir = self.path.join(path);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    pub fn envprep_bin() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_envprep"))
    }
}

/// Interpreter double used by the bootstrap tests: answers `--version`,
/// creates a working environment layout for `-m venv`, accepts any pip
/// invocation, and fails `-c` imports matching `$FAKE_PY_FAIL_IMPORT`.
#[cfg(unix)]
const FAKE_PYTHON: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "Python 3.11.4"
  exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "venv" ]; then
  mkdir -p "$3/bin"
  cp "$0" "$3/bin/python"
  chmod +x "$3/bin/python"
  exit 0
fi
if [ "$1" = "-m" ] && [ "$2" = "pip" ]; then
  exit 0
fi
if [ "$1" = "-c" ]; then
  if [ -n "$FAKE_PY_FAIL_IMPORT" ]; then
    case "$2" in
      *"$FAKE_PY_FAIL_IMPORT"*) exit 1 ;;
    esac
  fi
  exit 0
fi
exit 0
"#;

/// Install the interpreter double plus stub `vexis` and `pip` tools into a
/// bin directory, returning a PATH value that resolves them first.
#[cfg(unix)]
#[allow(dead_code)]
pub fn fake_toolchain(project: &TestProject) -> std::ffi::OsString {
    use std::os::unix::fs::PermissionsExt;

    let bin = project.create_dir("fakebin");
    for (name, content) in [
        ("python3", FAKE_PYTHON),
        ("vexis", "#!/bin/sh\nexit 0\n"),
        ("pip", "#!/bin/sh\nexit 0\n"),
    ] {
        let path = bin.join(name);
        std::fs::write(&path, content).expect("Failed to write fake tool");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to chmod fake tool");
    }

    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut paths = vec![bin];
    paths.extend(std::env::split_paths(&current));
    std::env::join_paths(paths).expect("Failed to join PATH")
}
