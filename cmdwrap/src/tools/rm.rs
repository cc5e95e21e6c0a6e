//! Forceful recursive removal.

use std::ffi::OsString;
use std::path::Path;

use crate::core::spec::InvocationSpec;
use crate::io::process::Invoker;

/// `rm -rf <tree>`
///
/// `rm -f` succeeds on a missing path. Callers that treat a missing tree as
/// an error check for it before invoking.
pub fn remove_tree(program: impl Into<OsString>, tree: impl AsRef<Path>) -> Invoker {
    let tree = tree.as_ref();
    Invoker::new(
        InvocationSpec::new(program)
            .arg("-rf")
            .arg(tree)
            .failure_message(format!("Couldn't remove \"{}\"", tree.display())),
    )
}
