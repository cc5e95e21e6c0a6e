//! Classification of a finished child's exit status.

use std::process::ExitStatus;

/// How a child process ended.
///
/// A signal-terminated child reports `exit_code == -signal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: i32,
    pub signal: Option<i32>,
}

impl Outcome {
    pub fn exited(code: i32) -> Self {
        Self {
            exit_code: code,
            signal: None,
        }
    }

    pub fn killed(signal: i32) -> Self {
        Self {
            exit_code: -signal,
            signal: Some(signal),
        }
    }

    #[cfg(unix)]
    pub fn from_status(status: ExitStatus) -> Self {
        use std::os::unix::process::ExitStatusExt;

        match (status.code(), status.signal()) {
            (Some(code), _) => Self::exited(code),
            (None, Some(sig)) => Self::killed(sig),
            (None, None) => Self::exited(-1),
        }
    }

    #[cfg(not(unix))]
    pub fn from_status(status: ExitStatus) -> Self {
        Self::exited(status.code().unwrap_or(-1))
    }

    pub fn success(&self) -> bool {
        self.signal.is_none() && self.exit_code == 0
    }

    pub fn signaled(&self) -> bool {
        self.signal.is_some()
    }

    /// Diagnostic for an abnormal exit, `None` on success.
    pub fn describe(&self, program: &str) -> Option<String> {
        match self.signal {
            Some(sig) => Some(format!("{program} was terminated by signal {sig}")),
            None if self.exit_code != 0 => Some(format!("{program} returned {}", self.exit_code)),
            None => None,
        }
    }
}
