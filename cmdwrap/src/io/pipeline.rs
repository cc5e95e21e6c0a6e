//! Copying a directory tree through a pair of piped `tar` processes.
//!
//! The producer archives the source tree to stdout, the consumer extracts
//! from stdin and lists what it wrote. Nothing touches the filesystem twice.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};

use tracing::{debug, error, instrument, warn};

use crate::core::path::normalize_listed;
use crate::core::spec::exclude_args;
use crate::error::{Error, Result};

/// Program names for both ends of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeCopy {
    producer: OsString,
    consumer: OsString,
}

impl Default for TreeCopy {
    fn default() -> Self {
        Self::with_tar("tar")
    }
}

impl TreeCopy {
    /// Use the same tar binary for both ends.
    pub fn with_tar(tar: impl Into<OsString>) -> Self {
        let tar = tar.into();
        Self {
            producer: tar.clone(),
            consumer: tar,
        }
    }

    pub fn with_programs(producer: impl Into<OsString>, consumer: impl Into<OsString>) -> Self {
        Self {
            producer: producer.into(),
            consumer: consumer.into(),
        }
    }

    /// Copy `orig_dir` into `dest_dir`, or into the current directory if
    /// `dest_dir` is `None`.
    ///
    /// Returns the normalised paths the consumer reported, in order. Any
    /// failure discards them and yields [`Error::CopyFailed`].
    #[instrument(skip_all, fields(orig = %orig_dir.display()))]
    pub fn copy<S: AsRef<str>>(
        &self,
        orig_dir: &Path,
        dest_dir: Option<&Path>,
        filters: &[S],
    ) -> Result<Vec<PathBuf>> {
        let result = self.pipe(orig_dir, dest_dir, filters);
        if let Err(err) = &result {
            error!("{err}");
        }
        result
    }

    fn pipe<S: AsRef<str>>(
        &self,
        orig_dir: &Path,
        dest_dir: Option<&Path>,
        filters: &[S],
    ) -> Result<Vec<PathBuf>> {
        let mut producer = Command::new(&self.producer);
        producer
            .args(exclude_args(filters))
            .args(["-cSpf", "-", "."])
            .current_dir(orig_dir)
            .stdout(Stdio::piped());
        debug!(program = ?self.producer, filters = filters.len(), "spawning producer");
        let mut producer = producer.spawn().map_err(copy_failed)?;

        let Some(pipe) = producer.stdout.take() else {
            reap(&mut producer);
            return Err(Error::CopyFailed("producer stdout was not piped".to_string()));
        };

        // The `Command` owning our copy of the read end is dropped at the end
        // of this block, leaving the consumer as the pipe's only reader.
        let consumer = {
            let mut consumer = Command::new(&self.consumer);
            consumer
                .args(["-xvSpf", "-"])
                .stdin(Stdio::from(pipe))
                .stdout(Stdio::piped());
            if let Some(dest) = dest_dir {
                consumer.current_dir(dest);
            }
            debug!(program = ?self.consumer, dest = ?dest_dir, "spawning consumer");
            consumer.spawn()
        };
        let mut consumer = match consumer {
            Ok(child) => child,
            Err(err) => {
                reap(&mut producer);
                return Err(copy_failed(err));
            }
        };

        let mut listing = Vec::new();
        let read = match consumer.stdout.take() {
            Some(mut stdout) => stdout.read_to_end(&mut listing).map_err(copy_failed),
            None => Err(Error::CopyFailed("consumer stdout was not piped".to_string())),
        };

        let producer_status = producer.wait().map_err(copy_failed);
        let consumer_status = consumer.wait().map_err(copy_failed);
        read?;
        let (producer_status, consumer_status) = (producer_status?, consumer_status?);
        if !producer_status.success() || !consumer_status.success() {
            debug!(
                producer = ?producer_status.code(),
                consumer = ?consumer_status.code(),
                "pipeline exit status"
            );
            return Err(Error::CopyFailed("pipe failed.".to_string()));
        }

        let listing = String::from_utf8_lossy(&listing);
        let files: Vec<PathBuf> = listing.split('\n').filter_map(normalize_listed).collect();
        debug!(count = files.len(), "copied files");
        Ok(files)
    }
}

/// Copy `orig_dir` into the current directory through a tar pipe.
pub fn copy_from<S: AsRef<str>>(orig_dir: impl AsRef<Path>, filters: &[S]) -> Result<Vec<PathBuf>> {
    TreeCopy::default().copy(orig_dir.as_ref(), None, filters)
}

/// Copy `orig_dir` into `dest_dir` through a tar pipe.
pub fn copy_into<S: AsRef<str>>(
    orig_dir: impl AsRef<Path>,
    dest_dir: impl AsRef<Path>,
    filters: &[S],
) -> Result<Vec<PathBuf>> {
    TreeCopy::default().copy(orig_dir.as_ref(), Some(dest_dir.as_ref()), filters)
}

fn copy_failed(err: std::io::Error) -> Error {
    Error::CopyFailed(err.to_string())
}

fn reap(child: &mut Child) {
    if let Err(err) = child.kill() {
        debug!(err = %err, "producer already exited");
    }
    if let Err(err) = child.wait() {
        warn!(err = %err, "failed to reap producer");
    }
}
