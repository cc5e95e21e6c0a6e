//! Immutable description of how to launch one external program.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Shell used when an invocation is shell-interpreted.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Program, fixed argument prefix and launch options for an invoker.
///
/// Built once with the chained setters below, then handed to
/// [`Invoker::new`](crate::io::process::Invoker::new).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationSpec {
    program: OsString,
    fixed_args: Vec<OsString>,
    use_shell: bool,
    shell: OsString,
    extra_env: Option<BTreeMap<OsString, OsString>>,
    cwd: Option<PathBuf>,
    failure_message: Option<String>,
}

impl InvocationSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            fixed_args: Vec::new(),
            use_shell: false,
            shell: OsString::from(DEFAULT_SHELL),
            extra_env: None,
            cwd: None,
            failure_message: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.fixed_args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.fixed_args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Join the command line and hand it to a shell instead of exec'ing it.
    ///
    /// Arguments are joined with single spaces; quoting is the caller's job.
    pub fn shell(mut self, enabled: bool) -> Self {
        self.use_shell = enabled;
        self
    }

    pub fn shell_program(mut self, shell: impl Into<OsString>) -> Self {
        self.shell = shell.into();
        self
    }

    /// Overlay one variable on the inherited environment.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.extra_env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        let env = self.extra_env.get_or_insert_with(BTreeMap::new);
        for (k, v) in vars {
            env.insert(k.into(), v.into());
        }
        self
    }

    /// Launch the child in `dir` without touching the parent's cwd.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Line logged after a strict invocation fails.
    pub fn failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = Some(message.into());
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn fixed_args(&self) -> &[OsString] {
        &self.fixed_args
    }

    pub fn uses_shell(&self) -> bool {
        self.use_shell
    }

    pub fn shell_path(&self) -> &OsStr {
        &self.shell
    }

    pub fn extra_env(&self) -> Option<&BTreeMap<OsString, OsString>> {
        self.extra_env.as_ref()
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// The configured failure line, or `Couldn't run '<program> <fixed args>'`.
    pub fn failure_line(&self) -> String {
        match &self.failure_message {
            Some(msg) => msg.clone(),
            None => format!("Couldn't run '{}'", join_lossy(self.command_line(&[] as &[&str]))),
        }
    }

    /// `fixed_args ++ args`, in order, without the program name.
    pub fn call_args<S: AsRef<OsStr>>(&self, args: &[S]) -> Vec<OsString> {
        self.fixed_args
            .iter()
            .cloned()
            .chain(args.iter().map(|a| a.as_ref().to_os_string()))
            .collect()
    }

    /// Program followed by `fixed_args ++ args`.
    pub fn command_line<S: AsRef<OsStr>>(&self, args: &[S]) -> Vec<OsString> {
        std::iter::once(self.program.clone())
            .chain(self.call_args(args))
            .collect()
    }

    /// The single string a shell receives in shell mode.
    pub fn shell_line<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        join_lossy(self.command_line(args))
    }
}

fn join_lossy(parts: Vec<OsString>) -> String {
    parts
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render `--exclude=<pattern>` for each filter, preserving order.
pub fn exclude_args<S: AsRef<str>>(filters: &[S]) -> Vec<String> {
    filters
        .iter()
        .map(|f| format!("--exclude={}", f.as_ref()))
        .collect()
}
