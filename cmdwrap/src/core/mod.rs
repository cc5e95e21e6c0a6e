//! Deterministic, pure logic shared by the invokers.
//!
//! Core modules must be free of I/O side effects. They describe invocations,
//! classify exit statuses and normalise paths, and are suitable for tests
//! without spawning anything.

pub mod outcome;
pub mod path;
pub mod spec;
