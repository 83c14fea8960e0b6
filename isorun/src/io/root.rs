//! Repository root resolution.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use super::config::CONFIG_FILE_NAME;

/// Resolve the repository root for a session.
///
/// An explicit root must exist and is canonicalized. Otherwise the search
/// walks upward from the current directory until it finds a directory
/// containing either `isorun.toml` or the runner path, so invocation works
/// from any subdirectory of the repository.
pub fn resolve_root(explicit: Option<&Path>, runner_rel: &Path) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return root
            .canonicalize()
            .with_context(|| format!("resolve root {}", root.display()));
    }

    let cwd = env::current_dir().context("resolve current directory")?;
    match search_upward(&cwd, runner_rel) {
        Some(found) => {
            let root = found
                .canonicalize()
                .with_context(|| format!("resolve root {}", found.display()))?;
            debug!(root = %root.display(), "repository root resolved");
            Ok(root)
        }
        None => Err(anyhow!(
            "could not locate {} or {} in {} or any parent directory (pass --root)",
            runner_rel.display(),
            CONFIG_FILE_NAME,
            cwd.display()
        )),
    }
}

/// Walk from `start` upward looking for a directory that holds the config
/// file or the runner.
pub fn search_upward(start: &Path, runner_rel: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        if dir.join(CONFIG_FILE_NAME).is_file() || dir.join(runner_rel).is_file() {
            return Some(dir.to_path_buf());
        }
        dir = dir.parent()?;
    }
}
