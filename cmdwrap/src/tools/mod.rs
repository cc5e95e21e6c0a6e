//! Argument templates for the external tools the orchestration layer drives.
//!
//! Each builder returns an [`Invoker`](crate::io::process::Invoker) (or a thin
//! struct owning one) whose fixed arguments and failure line are specific to
//! the tool. No behaviour beyond argument assembly lives here.

pub mod debian;
pub mod git;
pub mod rm;
pub mod tar;
pub mod zip;
