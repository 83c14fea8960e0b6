//! Helpers for running the delegated runner as a child process.

use std::process::{Command, ExitStatus};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, warn};
use wait_timeout::ChildExt;

/// Exit information for a delegated run.
#[derive(Debug)]
pub struct RunnerExit {
    pub status: ExitStatus,
    pub timed_out: bool,
}

/// Run `cmd` to completion with inherited stdio.
///
/// With a timeout, waits up to the budget, then kills and reaps the child.
/// Without one, blocks until the child exits: a hung runner hangs the
/// bootstrap, matching the historical behavior.
pub fn run_to_completion(mut cmd: Command, timeout: Option<Duration>) -> Result<RunnerExit> {
    debug!("spawning delegated runner");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn runner");
            return Err(e).context("spawn runner");
        }
    };

    let (status, timed_out) = match timeout {
        None => (child.wait().context("wait for runner")?, false),
        Some(budget) => match child.wait_timeout(budget).context("wait for runner")? {
            Some(status) => (status, false),
            None => {
                warn!(
                    timeout_secs = budget.as_secs(),
                    "runner timed out, killing"
                );
                child.kill().context("kill runner")?;
                (child.wait().context("wait runner after kill")?, true)
            }
        },
    };

    debug!(exit_code = ?status.code(), timed_out, "runner finished");
    Ok(RunnerExit { status, timed_out })
}
