//! Test-only fixtures for driving sessions against scripted runners.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::session::SessionRequest;

/// Runner location inside a scripted project, relative to its root.
pub const RUNNER_REL: &str = "tests/runner.sh";

/// Temporary project whose runner is a `/bin/sh` script.
///
/// The default script records the session as seen from inside the runner
/// (home, module path, argv, home subdirectories) to `record.txt` in the
/// project root, then exits with a scripted code.
pub struct ScriptedProject {
    dir: TempDir,
    record_path: PathBuf,
}

impl ScriptedProject {
    /// Project whose runner records the session and exits with `exit_code`.
    pub fn new(exit_code: i32) -> Result<Self> {
        let dir = tempfile::tempdir().context("create project dir")?;
        let record_path = dir.path().join("record.txt");
        let script = format!(
            r#"#!/bin/sh
{{
  printf 'home=%s\n' "$HOME"
  printf 'module_path=%s\n' "$PYTHONPATH"
  for arg in "$@"; do printf 'arg=%s\n' "$arg"; done
  if [ -d "$HOME/.config" ] && [ -d "$HOME/.cache" ]; then
    printf 'subdirs=present\n'
  else
    printf 'subdirs=missing\n'
  fi
}} > '{record}'
exit {code}
"#,
            record = record_path.display(),
            code = exit_code
        );
        write_runner(dir.path(), &script)?;
        Ok(Self { dir, record_path })
    }

    /// Project with a caller-supplied runner script body.
    pub fn with_script(script: &str) -> Result<Self> {
        let dir = tempfile::tempdir().context("create project dir")?;
        let record_path = dir.path().join("record.txt");
        write_runner(dir.path(), script)?;
        Ok(Self { dir, record_path })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Lines written by the recording runner script.
    pub fn record_lines(&self) -> Result<Vec<String>> {
        let raw = fs::read_to_string(&self.record_path)
            .with_context(|| format!("read {}", self.record_path.display()))?;
        Ok(raw.lines().map(str::to_string).collect())
    }

    /// Session request invoking the scripted runner through `/bin/sh`.
    pub fn request(&self, args: &[&str]) -> SessionRequest {
        SessionRequest {
            root: self.root().to_path_buf(),
            runner: PathBuf::from(RUNNER_REL),
            interpreter: "/bin/sh".to_string(),
            args: args.iter().map(OsString::from).collect(),
            timeout: None,
            keep_home: false,
        }
    }
}

fn write_runner(root: &Path, script: &str) -> Result<()> {
    let path = root.join(RUNNER_REL);
    let parent = path
        .parent()
        .context("runner path missing parent")?;
    fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    fs::write(&path, script).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
