//! Error model shared by every invoker, builder and the tree copy.

use thiserror::Error;

/// Failures raised by the execution layer and its collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// The child could not be launched, or (strict form) it exited abnormally.
    ///
    /// Strict invocations leave `reason` empty: the diagnostic has already
    /// been logged by the time the error is returned.
    #[error("{}", .reason.as_deref().unwrap_or("command execution failed"))]
    ExecutionFailed { reason: Option<String> },

    /// A required tool is missing or a configuration value is unusable.
    #[error("{0}")]
    Config(String),

    /// Either side of the tar pipeline failed.
    #[error("Cannot copy files, {0}")]
    CopyFailed(String),

    /// A tag message template could not be rendered.
    #[error("cannot render message template: {0}")]
    Template(String),

    /// Switching the process working directory failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn launch(err: &std::io::Error) -> Self {
        Error::ExecutionFailed {
            reason: Some(format!("Execution failed: {err}")),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_failure_has_generic_message() {
        let err = Error::ExecutionFailed { reason: None };
        assert_eq!(err.to_string(), "command execution failed");
    }

    #[test]
    fn launch_failure_carries_os_text() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory");
        assert_eq!(
            Error::launch(&io).to_string(),
            "Execution failed: No such file or directory"
        );
    }

    #[test]
    fn copy_failure_message() {
        assert_eq!(
            Error::CopyFailed("pipe failed.".to_string()).to_string(),
            "Cannot copy files, pipe failed."
        );
    }
}
