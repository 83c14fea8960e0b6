//! Classification of a delegated run and the temp-home disposition.

use std::path::PathBuf;

/// Result of the delegated runner, as seen by the bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerVerdict {
    /// Runner exited 0.
    Passed,
    /// Runner exited non-zero. The code is `None` when the runner was
    /// killed by a signal.
    Failed(Option<i32>),
    /// Runner exceeded the configured wall-clock budget and was killed.
    TimedOut,
}

impl RunnerVerdict {
    /// Classify a finished run from its wait result.
    pub fn classify(timed_out: bool, code: Option<i32>) -> Self {
        if timed_out {
            return Self::TimedOut;
        }
        match code {
            Some(0) => Self::Passed,
            other => Self::Failed(other),
        }
    }

    pub fn is_pass(self) -> bool {
        self == Self::Passed
    }

    /// Exit code the bootstrap itself reports for this verdict.
    ///
    /// Delegated failures are normalized to 1 regardless of the runner's
    /// own code.
    pub fn normalized_exit(self) -> i32 {
        if self.is_pass() {
            crate::exit_codes::OK
        } else {
            crate::exit_codes::FAILED
        }
    }
}

/// What happened to the temporary home at session end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeDisposition {
    /// Deleted after a successful run.
    Released,
    /// Left on disk for post-mortem inspection.
    Preserved,
}

/// Final outcome of one session, reported by [`crate::session::run_session`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    pub verdict: RunnerVerdict,
    pub home: HomeDisposition,
    /// Path the temporary home occupied (still on disk iff `Preserved`).
    pub home_path: PathBuf,
}

impl SessionOutcome {
    pub fn exit_code(&self) -> i32 {
        self.verdict.normalized_exit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_code_is_pass() {
        let verdict = RunnerVerdict::classify(false, Some(0));
        assert_eq!(verdict, RunnerVerdict::Passed);
        assert_eq!(verdict.normalized_exit(), 0);
    }

    #[test]
    fn nonzero_codes_normalize_to_one() {
        for code in [1, 2, 3, 127] {
            let verdict = RunnerVerdict::classify(false, Some(code));
            assert_eq!(verdict, RunnerVerdict::Failed(Some(code)));
            assert_eq!(verdict.normalized_exit(), 1);
        }
    }

    #[test]
    fn signal_death_is_failure_without_code() {
        let verdict = RunnerVerdict::classify(false, None);
        assert_eq!(verdict, RunnerVerdict::Failed(None));
        assert_eq!(verdict.normalized_exit(), 1);
    }

    #[test]
    fn timeout_wins_over_exit_code() {
        let verdict = RunnerVerdict::classify(true, None);
        assert_eq!(verdict, RunnerVerdict::TimedOut);
        assert_eq!(verdict.normalized_exit(), 1);
    }
}
