//! Git subcommand invokers.
//!
//! Every builder produces `git <subcommand> ...` with a failure line naming
//! what went wrong. A working directory may be pinned with [`Git::in_dir`].

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use minijinja::{Environment, context};
use tracing::{debug, instrument};

use crate::core::spec::InvocationSpec;
use crate::error::{Error, Result};
use crate::io::process::Invoker;

/// Tag message used when the caller supplies none.
pub const DEFAULT_TAG_MESSAGE: &str = "Tagging {{ version }}";

/// Factory for git invokers sharing one binary and working directory.
#[derive(Debug, Clone)]
pub struct Git {
    program: OsString,
    workdir: Option<PathBuf>,
}

impl Default for Git {
    fn default() -> Self {
        Self::new("git")
    }
}

impl Git {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            workdir: None,
        }
    }

    /// Run every built command inside `workdir`.
    pub fn in_dir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(workdir.into());
        self
    }

    fn spec(&self, subcommand: &str) -> InvocationSpec {
        let spec = InvocationSpec::new(&self.program)
            .arg(subcommand)
            .failure_message(format!("Couldn't run git {subcommand}"));
        match &self.workdir {
            Some(dir) => spec.current_dir(dir),
            None => spec,
        }
    }

    /// `git <subcommand> <args...>`, call-time arguments appended.
    pub fn command<S: AsRef<OsStr>>(&self, subcommand: &str, args: &[S]) -> Invoker {
        Invoker::new(self.spec(subcommand).args(args))
    }

    /// `git clone`; pass the repository and target per call.
    pub fn clone_repo(&self) -> Invoker {
        Invoker::new(
            self.spec("clone")
                .failure_message("Couldn't clone git repository"),
        )
    }

    pub fn branch(&self) -> GitBranch {
        GitBranch {
            invoker: Invoker::new(self.spec("branch")),
        }
    }

    /// `git fetch [remote]`
    pub fn fetch(&self, remote: Option<&str>) -> Invoker {
        Invoker::new(self.spec("fetch").args(remote))
    }

    /// `git merge <branch> [--no-summary]`; the summary is kept when `verbose`.
    pub fn merge(&self, branch: &str, verbose: bool) -> Invoker {
        let spec = self
            .spec("merge")
            .arg(branch)
            .args((!verbose).then_some("--no-summary"))
            .failure_message(format!("Couldn't merge from \"{branch}\""));
        Invoker::new(spec)
    }

    pub fn tag(&self, sign: SignMode) -> GitTag {
        GitTag {
            invoker: Invoker::new(self.spec("tag")),
            sign,
        }
    }
}

/// Creates branches, optionally tracking a remote ref.
#[derive(Debug)]
pub struct GitBranch {
    invoker: Invoker,
}

impl GitBranch {
    /// `git branch <branch> [remote]`
    pub fn create(&self, branch: &str, remote: Option<&str>) -> Result<()> {
        let mut args = vec![branch];
        args.extend(remote);
        self.invoker
            .invoke_reporting(&args, &format!("Couldn't create branch \"{branch}\""))
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}

/// How an annotated tag is signed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SignMode {
    #[default]
    Unsigned,
    /// `-s`, using the committer's default key.
    DefaultKey,
    /// `-u <keyid>`.
    Key(String),
}

impl SignMode {
    pub fn from_options(sign: bool, keyid: Option<String>) -> Self {
        match (sign, keyid) {
            (false, _) => SignMode::Unsigned,
            (true, Some(key)) => SignMode::Key(key),
            (true, None) => SignMode::DefaultKey,
        }
    }

    fn args(&self) -> Vec<String> {
        match self {
            SignMode::Unsigned => Vec::new(),
            SignMode::DefaultKey => vec!["-s".to_string()],
            SignMode::Key(key) => vec!["-u".to_string(), key.clone()],
        }
    }
}

/// Creates annotated tags.
///
/// Signing failures, an existing tag and any other error all surface as the
/// same `Couldn't tag "<version>"` failure.
#[derive(Debug)]
pub struct GitTag {
    invoker: Invoker,
    sign: SignMode,
}

impl GitTag {
    /// `git tag [-s | -u <key>] -m <message> <version> [commit]`
    ///
    /// `message` is a template rendered with `version` in scope; `None` uses
    /// [`DEFAULT_TAG_MESSAGE`].
    #[instrument(skip_all, fields(version = %version))]
    pub fn create(&self, version: &str, message: Option<&str>, commit: Option<&str>) -> Result<()> {
        let args = self.args(version, message, commit)?;
        debug!(signed = self.sign != SignMode::Unsigned, "creating tag");
        self.invoker
            .invoke_reporting(&args, &format!("Couldn't tag \"{version}\""))
    }

    /// Call-time arguments for [`create`](Self::create).
    pub fn args(
        &self,
        version: &str,
        message: Option<&str>,
        commit: Option<&str>,
    ) -> Result<Vec<String>> {
        let message = render_tag_message(message.unwrap_or(DEFAULT_TAG_MESSAGE), version)?;
        let mut args = self.sign.args();
        args.extend(["-m".to_string(), message, version.to_string()]);
        args.extend(commit.map(str::to_string));
        Ok(args)
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}

/// Render a tag message template with `version` substituted.
pub fn render_tag_message(template: &str, version: &str) -> Result<String> {
    let env = Environment::new();
    env.render_str(template, context! { version => version })
        .map_err(|err| Error::Template(err.to_string()))
}
