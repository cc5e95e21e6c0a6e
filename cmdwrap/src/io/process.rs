//! Running one external program with a fixed argument prefix.
//!
//! An [`Invoker`] offers two calling conventions over the same primitive:
//! [`Invoker::invoke`] logs and fails on anything but a clean exit, while
//! [`Invoker::run`] hands the [`Outcome`] back for the caller to judge.

use std::cell::Cell;
use std::ffi::OsStr;
use std::io;
use std::process::Command;

use tracing::{debug, error, instrument};

use crate::core::outcome::Outcome;
use crate::core::spec::InvocationSpec;
use crate::error::{Error, Result};

/// A reusable wrapper around one program and its launch options.
///
/// Each call spawns, waits for and reaps its child before returning. The
/// invoker remembers only the exit code of the latest call.
#[derive(Debug)]
pub struct Invoker {
    spec: InvocationSpec,
    last_exit_code: Cell<Option<i32>>,
}

impl Invoker {
    pub fn new(spec: InvocationSpec) -> Self {
        Self {
            spec,
            last_exit_code: Cell::new(None),
        }
    }

    pub fn spec(&self) -> &InvocationSpec {
        &self.spec
    }

    /// Exit code of the most recent call, `None` before the first call or
    /// after a launch failure.
    pub fn last_exit_code(&self) -> Option<i32> {
        self.last_exit_code.get()
    }

    /// Run with `args` appended and fail unless the child exits with 0.
    ///
    /// The cause is logged at error level before returning
    /// [`Error::ExecutionFailed`] without a reason.
    pub fn invoke<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<()> {
        self.invoke_reporting(args, &self.spec.failure_line())
    }

    /// Like [`invoke`](Self::invoke) but logs `failure_message` as the final
    /// line instead of the invocation's own.
    pub(crate) fn invoke_reporting<S: AsRef<OsStr>>(
        &self,
        args: &[S],
        failure_message: &str,
    ) -> Result<()> {
        let program = self.program_name();
        match self.execute(args) {
            Ok(outcome) => match outcome.describe(&program) {
                None => return Ok(()),
                Some(diagnostic) => error!("{diagnostic}"),
            },
            Err(err) => error!("Execution failed: {err}"),
        }
        error!("{failure_message}");
        Err(Error::ExecutionFailed { reason: None })
    }

    /// Run with `args` appended and return how the child ended.
    ///
    /// Only a launch failure is an error here.
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> Result<Outcome> {
        self.execute(args).map_err(|err| Error::launch(&err))
    }

    #[instrument(skip_all, fields(program = %self.program_name()))]
    fn execute<S: AsRef<OsStr>>(&self, args: &[S]) -> io::Result<Outcome> {
        debug!(
            "{} {:?} {:?}",
            self.program_name(),
            self.spec.fixed_args(),
            args.iter().map(|a| a.as_ref()).collect::<Vec<_>>()
        );
        self.last_exit_code.set(None);
        let mut cmd = self.build_command(args);
        let status = cmd.status()?;
        let outcome = Outcome::from_status(status);
        self.last_exit_code.set(Some(outcome.exit_code));
        debug!(exit_code = outcome.exit_code, signal = ?outcome.signal, "command finished");
        Ok(outcome)
    }

    fn build_command<S: AsRef<OsStr>>(&self, args: &[S]) -> Command {
        let mut cmd = if self.spec.uses_shell() {
            let mut c = Command::new(self.spec.shell_path());
            c.arg("-c").arg(self.spec.shell_line(args));
            c
        } else {
            let mut c = Command::new(self.spec.program());
            c.args(self.spec.call_args(args));
            c
        };
        if let Some(dir) = self.spec.cwd() {
            cmd.current_dir(dir);
        }
        if let Some(env) = self.spec.extra_env() {
            cmd.envs(env);
        }
        cmd
    }

    fn program_name(&self) -> String {
        self.spec.program().to_string_lossy().into_owned()
    }
}

impl From<InvocationSpec> for Invoker {
    fn from(spec: InvocationSpec) -> Self {
        Self::new(spec)
    }
}
