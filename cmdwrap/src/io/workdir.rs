//! Scoped change of the process-wide working directory.
//!
//! Prefer [`InvocationSpec::current_dir`](crate::core::spec::InvocationSpec::current_dir),
//! which only affects the child. Use this module when a tool insists on
//! running from the caller's own cwd.

use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

use crate::core::spec::InvocationSpec;
use crate::error::{Error, Result};
use crate::io::process::Invoker;

/// Serialises cwd changes made through this module. Not reentrant.
static CWD_LOCK: Mutex<()> = Mutex::new(());

struct RestoreDir {
    previous: PathBuf,
}

impl Drop for RestoreDir {
    fn drop(&mut self) {
        if let Err(err) = env::set_current_dir(&self.previous) {
            warn!(
                dir = %self.previous.display(),
                err = %err,
                "failed to restore working directory"
            );
        }
    }
}

/// Run `f` with the working directory switched to `dir`.
///
/// The previous directory is restored on every exit path, including errors
/// and panics, before the result propagates.
pub fn with_current_dir<T>(dir: impl AsRef<Path>, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let dir = dir.as_ref();
    let _lock = CWD_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

    let previous = env::current_dir().map_err(|source| Error::Io {
        context: "read current directory".to_string(),
        source,
    })?;
    env::set_current_dir(dir).map_err(|source| Error::Io {
        context: format!("change directory to {}", dir.display()),
        source,
    })?;
    let _restore = RestoreDir { previous };
    debug!(dir = %dir.display(), "switched working directory");

    f()
}

/// An invoker that runs from a directory chosen per call.
#[derive(Debug)]
pub struct RunAt {
    invoker: Invoker,
}

impl RunAt {
    pub fn new(spec: InvocationSpec) -> Self {
        Self {
            invoker: Invoker::new(spec),
        }
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }

    /// Strict invocation with the process cwd temporarily set to `dir`.
    pub fn invoke<S: AsRef<OsStr>>(&self, dir: impl AsRef<Path>, args: &[S]) -> Result<()> {
        with_current_dir(dir, || self.invoker.invoke(args))
    }
}
