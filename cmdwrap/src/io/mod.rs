//! Side-effecting helpers: spawning children, changing directories, loading
//! configuration.

pub mod config;
pub mod pipeline;
pub mod process;
pub mod workdir;
