//! Uniform wrappers for invoking external tools.
//!
//! The crate keeps a strict separation:
//!
//! - **[`core`]**: pure descriptions of invocations, exit-status
//!   classification and path normalisation. No I/O.
//! - **[`io`]**: spawning children ([`io::process::Invoker`]), scoped
//!   working-directory changes ([`io::workdir`]), the piped tree copy
//!   ([`io::pipeline`]) and configuration loading.
//! - **[`tools`]**: argument templates for tar, rm, git, unzip and the Debian
//!   packaging tools, built on [`io::process::Invoker`].
//!
//! Every invocation blocks until its child has exited and been reaped.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tools;

pub use crate::core::outcome::Outcome;
pub use crate::core::spec::InvocationSpec;
pub use crate::error::{Error, Result};
pub use crate::io::pipeline::{TreeCopy, copy_from, copy_into};
pub use crate::io::process::Invoker;
pub use crate::io::workdir::{RunAt, with_current_dir};
