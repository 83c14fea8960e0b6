//! Temporary home directory lifecycle.
//!
//! The home is a two-outcome resource: released (deleted) after a
//! successful run, preserved on disk after a failed one. There is no
//! `Drop` cleanup; the session decides which way it ends, and a setup
//! failure before delegation leaves nothing behind to settle.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Subdirectories a runner expects to find inside a user home.
pub const HOME_SUBDIRS: [&str; 2] = [".config", ".cache"];

/// A uniquely-named stand-in for the user's home directory.
#[derive(Debug)]
pub struct TempHome {
    path: PathBuf,
}

impl TempHome {
    /// Create a fresh home under the system temp root, with `.config` and
    /// `.cache` inside. The path is unique per call, so concurrent
    /// invocations never collide.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("isorun-home-")
            .tempdir()
            .context("create temporary home directory")?;
        let path = dir.keep();
        for sub in HOME_SUBDIRS {
            let sub_path = path.join(sub);
            fs::create_dir(&sub_path)
                .with_context(|| format!("create {}", sub_path.display()))?;
        }
        debug!(path = %path.display(), "temporary home created");
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the home tree (success path).
    pub fn release(self) -> Result<()> {
        debug!(path = %self.path.display(), "releasing temporary home");
        fs::remove_dir_all(&self.path)
            .with_context(|| format!("remove temporary home {}", self.path.display()))
    }

    /// Keep the home on disk for inspection (failure path); returns the
    /// surviving path.
    pub fn preserve(self) -> PathBuf {
        self.path
    }
}
