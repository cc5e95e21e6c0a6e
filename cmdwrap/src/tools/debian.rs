//! Debian packaging tools: `dch`, `dpkg-source` and `pristine-tar`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::core::spec::InvocationSpec;
use crate::error::{Error, Result};
use crate::io::process::Invoker;

/// Where pristine-tar is expected unless configured otherwise.
pub const PRISTINE_TAR: &str = "/usr/bin/pristine-tar";

/// `dch -v <version> [msg]`
pub fn dch(program: impl Into<OsString>, version: &str, msg: Option<&str>) -> Invoker {
    Invoker::new(
        InvocationSpec::new(program)
            .args(["-v", version])
            .args(msg.filter(|m| !m.is_empty()))
            .failure_message("Dch failed."),
    )
}

/// Extracts a source package with `dpkg-source -x`.
#[derive(Debug)]
pub struct DpkgSourceExtract {
    invoker: Invoker,
}

impl Default for DpkgSourceExtract {
    fn default() -> Self {
        Self::new("dpkg-source")
    }
}

impl DpkgSourceExtract {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            invoker: Invoker::new(InvocationSpec::new(program).arg("-x")),
        }
    }

    /// `dpkg-source -x <dsc> <output_dir>`
    pub fn extract(&self, dsc: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Result<()> {
        let dsc = dsc.as_ref();
        self.invoker.invoke_reporting(
            &[dsc.as_os_str(), output_dir.as_ref().as_os_str()],
            &format!("Couldn't extract \"{}\"", dsc.display()),
        )
    }
}

/// Commits and checks out upstream tarballs via pristine-tar.
#[derive(Debug)]
pub struct PristineTar {
    invoker: Invoker,
}

impl PristineTar {
    /// Refuse to build unless `path` is an executable file.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !is_executable(&path) {
            return Err(Error::Config(format!(
                "{} not found - cannot use pristine-tar",
                path.display()
            )));
        }
        Ok(Self {
            invoker: Invoker::new(InvocationSpec::new(path.into_os_string())),
        })
    }

    /// `pristine-tar commit <archive> <branch>`
    pub fn commit(&self, archive: impl AsRef<Path>, branch: &str) -> Result<()> {
        self.invoker.invoke_reporting(
            &[OsString::from("commit"), archive.as_ref().into(), branch.into()],
            &format!("Couldn't commit to \"{branch}\""),
        )
    }

    /// `pristine-tar checkout <archive>`
    pub fn checkout(&self, archive: impl AsRef<Path>) -> Result<()> {
        let archive = archive.as_ref();
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| archive.display().to_string());
        self.invoker.invoke_reporting(
            &[OsString::from("checkout"), archive.into()],
            &format!("Couldn't checkout \"{name}\""),
        )
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
