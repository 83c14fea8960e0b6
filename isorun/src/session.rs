//! Orchestration for one isolated test session.
//!
//! A session: resolve inputs, create the temporary home, hand the delegated
//! runner an explicit environment map, wait for it, then settle the home.
//! The home is released after a passing run and preserved after anything
//! else, so a failure always leaves evidence behind.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::env::SessionEnv;
use crate::core::outcome::{HomeDisposition, RunnerVerdict, SessionOutcome};
use crate::io::home::TempHome;
use crate::io::process::run_to_completion;

/// Fully resolved inputs for one session.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    /// Absolute repository root.
    pub root: PathBuf,
    /// Runner path relative to `root`.
    pub runner: PathBuf,
    /// Interpreter invoked with the runner as its first argument.
    pub interpreter: String,
    /// Opaque arguments forwarded to the runner verbatim.
    pub args: Vec<OsString>,
    /// Optional wall-clock budget for the delegated run.
    pub timeout: Option<Duration>,
    /// Preserve the temporary home even on success.
    pub keep_home: bool,
}

/// Run one session and settle the temporary home.
///
/// Setup failures (missing runner, temp directory creation) are fatal and
/// return `Err` before anything needs cleanup. Once the runner has been
/// waited on, the result is always an `Ok` outcome carrying the verdict.
pub fn run_session(request: &SessionRequest) -> Result<SessionOutcome> {
    let runner_path = request.root.join(&request.runner);
    if !runner_path.is_file() {
        return Err(anyhow!("runner not found: {}", runner_path.display()));
    }

    let home = TempHome::create()?;
    let env = SessionEnv {
        module_path: request.root.clone(),
        home_dir: home.path().to_path_buf(),
    };
    debug!(
        root = %request.root.display(),
        runner = %runner_path.display(),
        "session prepared"
    );

    // Locator line for humans: after a failure this is the surviving path.
    let mut stdout = std::io::stdout();
    writeln!(stdout, "Test home: {}", home.path().display()).context("write temp home line")?;
    stdout.flush().context("flush stdout")?;

    let mut cmd = Command::new(&request.interpreter);
    cmd.arg(&runner_path)
        .args(&request.args)
        .current_dir(&request.root);
    for (key, value) in env.pairs() {
        cmd.env(key, value);
    }

    let exit = run_to_completion(cmd, request.timeout)?;
    let verdict = RunnerVerdict::classify(exit.timed_out, exit.status.code());

    Ok(settle_home(home, verdict, request.keep_home))
}

/// Apply the two-outcome home lifecycle for a finished run.
///
/// Deletion failure on the success path must not mask a passing run: it is
/// surfaced as a warning and the home is reported as preserved.
fn settle_home(home: TempHome, verdict: RunnerVerdict, keep_home: bool) -> SessionOutcome {
    let home_path = home.path().to_path_buf();

    if verdict.is_pass() && !keep_home {
        match home.release() {
            Ok(()) => {
                return SessionOutcome {
                    verdict,
                    home: HomeDisposition::Released,
                    home_path,
                };
            }
            Err(err) => {
                warn!(err = %err, "failed to remove temporary home");
                return SessionOutcome {
                    verdict,
                    home: HomeDisposition::Preserved,
                    home_path,
                };
            }
        }
    }

    let home_path = home.preserve();
    info!(path = %home_path.display(), "temporary home preserved");
    SessionOutcome {
        verdict,
        home: HomeDisposition::Preserved,
        home_path,
    }
}

/// Machine-readable session report printed by `isorun run --json`.
#[derive(Debug, Serialize)]
pub struct SessionReport {
    pub exit_code: i32,
    pub passed: bool,
    pub timed_out: bool,
    pub home_preserved: bool,
    pub home_path: String,
}

impl From<&SessionOutcome> for SessionReport {
    fn from(outcome: &SessionOutcome) -> Self {
        Self {
            exit_code: outcome.exit_code(),
            passed: outcome.verdict.is_pass(),
            timed_out: outcome.verdict == RunnerVerdict::TimedOut,
            home_preserved: outcome.home == HomeDisposition::Preserved,
            home_path: outcome.home_path.display().to_string(),
        }
    }
}
