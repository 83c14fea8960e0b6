//! Explicit environment map handed to the delegated runner.
//!
//! The bootstrap never mutates its own process environment. The overrides
//! live in a [`SessionEnv`] value and are applied to the child invocation
//! only, so nothing leaks between calls.

use std::path::{Path, PathBuf};

/// Environment variable carrying the module search path for the runner.
pub const MODULE_PATH_VAR: &str = "PYTHONPATH";
/// Environment variable carrying the substituted home directory.
pub const HOME_VAR: &str = "HOME";

/// Environment overrides for one delegated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEnv {
    /// Absolute repository root, exported as the module search path so the
    /// runner can locate shared library code.
    pub module_path: PathBuf,
    /// Temporary home directory substituted for the real one.
    pub home_dir: PathBuf,
}

impl SessionEnv {
    /// Variable/value pairs to set on the child process.
    pub fn pairs(&self) -> [(&'static str, &Path); 2] {
        [
            (MODULE_PATH_VAR, self.module_path.as_path()),
            (HOME_VAR, self.home_dir.as_path()),
        ]
    }
}
