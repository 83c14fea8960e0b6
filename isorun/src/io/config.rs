//! Bootstrap configuration stored in `isorun.toml` at the repository root.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// File name looked up under the repository root.
pub const CONFIG_FILE_NAME: &str = "isorun.toml";

/// Bootstrap configuration (TOML).
///
/// This file is intended to be edited by humans and must remain stable and
/// automatable. Missing fields default to sensible values; CLI flags
/// override anything set here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Delegated runner path, relative to the repository root.
    pub runner: String,

    /// Interpreter used to invoke the runner.
    pub interpreter: String,

    /// Optional wall-clock budget for the delegated run, in seconds.
    /// Unset means the bootstrap waits indefinitely.
    pub timeout_secs: Option<u64>,

    /// Preserve the temporary home even when the run succeeds.
    pub keep_home: bool,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            runner: "tests/runner.py".to_string(),
            interpreter: "python3".to_string(),
            timeout_secs: None,
            keep_home: false,
        }
    }
}

impl BootstrapConfig {
    pub fn validate(&self) -> Result<()> {
        if self.runner.trim().is_empty() {
            return Err(anyhow!("runner must be a non-empty path"));
        }
        if Path::new(&self.runner).is_absolute() {
            return Err(anyhow!("runner must be relative to the repository root"));
        }
        if self.interpreter.trim().is_empty() {
            return Err(anyhow!("interpreter must be non-empty"));
        }
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be > 0 when set"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `BootstrapConfig::default()`.
pub fn load_config(path: &Path) -> Result<BootstrapConfig> {
    if !path.exists() {
        let cfg = BootstrapConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: BootstrapConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &BootstrapConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
