//! `tar` pack, unpack and catenate.

use std::ffi::{OsStr, OsString};
use std::path::Path;

use crate::core::spec::{InvocationSpec, exclude_args};
use crate::error::Result;
use crate::io::process::Invoker;

/// Compression flag passed to tar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Compression {
    /// Let tar pick from the archive suffix (`-a`).
    #[default]
    Auto,
    Gzip,
    Bzip2,
    Xz,
    /// Any other flag, passed through verbatim.
    Custom(String),
}

impl Compression {
    pub fn flag(&self) -> &str {
        match self {
            Compression::Auto => "-a",
            Compression::Gzip => "-z",
            Compression::Bzip2 => "-j",
            Compression::Xz => "-J",
            Compression::Custom(flag) => flag,
        }
    }
}

/// Builder for tar invocations using a configurable binary.
#[derive(Debug, Clone)]
pub struct Tar {
    program: OsString,
}

impl Default for Tar {
    fn default() -> Self {
        Self::new("tar")
    }
}

impl Tar {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `tar --exclude=<f>... -C <dir> <compression> -xf <archive>`
    pub fn unpack<S: AsRef<str>>(
        &self,
        archive: impl AsRef<Path>,
        dir: impl AsRef<Path>,
        filters: &[S],
        compression: &Compression,
    ) -> Invoker {
        let archive = archive.as_ref();
        let spec = InvocationSpec::new(&self.program)
            .args(exclude_args(filters))
            .arg("-C")
            .arg(dir.as_ref())
            .args([compression.flag(), "-xf"])
            .arg(archive)
            .failure_message(format!("Couldn't unpack \"{}\"", archive.display()));
        Invoker::new(spec)
    }

    /// `tar --exclude=<f>... -C <dir> <compression> -cf <archive> <dest>`
    ///
    /// `dest` is the path inside `dir` to archive.
    pub fn pack<S: AsRef<str>>(
        &self,
        archive: impl AsRef<Path>,
        dir: impl AsRef<Path>,
        dest: impl AsRef<OsStr>,
        filters: &[S],
        compression: &Compression,
    ) -> Invoker {
        let archive = archive.as_ref();
        let spec = InvocationSpec::new(&self.program)
            .args(exclude_args(filters))
            .arg("-C")
            .arg(dir.as_ref())
            .args([compression.flag(), "-cf"])
            .arg(archive)
            .arg(dest)
            .failure_message(format!("Couldn't repack \"{}\"", archive.display()));
        Invoker::new(spec)
    }

    pub fn catenate(&self, archive: impl AsRef<Path>) -> Catenate {
        Catenate {
            invoker: Invoker::new(
                InvocationSpec::new(&self.program)
                    .args(["-A", "-f"])
                    .arg(archive.as_ref()),
            ),
        }
    }
}

/// Appends other archives onto one fixed archive.
#[derive(Debug)]
pub struct Catenate {
    invoker: Invoker,
}

impl Catenate {
    /// `tar -A -f <archive> <target>`
    pub fn append(&self, target: impl AsRef<OsStr>) -> Result<()> {
        self.invoker.invoke(&[target.as_ref()])
    }

    pub fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}
