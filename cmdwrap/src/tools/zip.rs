//! `unzip` extraction.

use std::ffi::OsString;
use std::path::Path;

use crate::core::spec::InvocationSpec;
use crate::io::process::Invoker;

/// `unzip -q <archive> -d <dir>`
pub fn unpack(program: impl Into<OsString>, archive: impl AsRef<Path>, dir: impl AsRef<Path>) -> Invoker {
    let archive = archive.as_ref();
    Invoker::new(
        InvocationSpec::new(program)
            .arg("-q")
            .arg(archive)
            .arg("-d")
            .arg(dir.as_ref())
            .failure_message(format!("Couldn't unpack \"{}\"", archive.display())),
    )
}
