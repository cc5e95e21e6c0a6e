//! Stable exit codes for the `cmdwrap` binary.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed: a wrapped program failed, could not launch, or the
/// configuration was invalid.
pub const FAILED: i32 = 1;
/// `run --lenient` saw a child killed by a signal; mirrors the shell's
/// `128 + signal` convention on top of this base.
pub const SIGNAL_BASE: i32 = 128;
