//! Process-wide working directory changes.
//!
//! Kept in its own test binary: these tests move the cwd of the whole
//! process.
#![cfg(unix)]

use std::env;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use cmdwrap::test_support::sample_tree;
use cmdwrap::{Error, InvocationSpec, RunAt, copy_from, with_current_dir};

/// Tests read the cwd outside `with_current_dir`, so they run one at a time.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}

#[test]
fn restores_cwd_after_success() {
    let _serial = serial();
    let before = env::current_dir().expect("cwd");
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().canonicalize().expect("canonical");

    let seen = with_current_dir(&target, || Ok(env::current_dir().expect("cwd")))
        .expect("closure");

    assert_eq!(seen, target);
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[test]
fn restores_cwd_after_error() {
    let _serial = serial();
    let before = env::current_dir().expect("cwd");
    let temp = tempfile::tempdir().expect("tempdir");

    let result: cmdwrap::Result<()> = with_current_dir(temp.path(), || {
        Err(Error::ExecutionFailed { reason: None })
    });

    assert!(result.is_err());
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[test]
fn restores_cwd_after_panic() {
    let _serial = serial();
    let before = env::current_dir().expect("cwd");
    let temp = tempfile::tempdir().expect("tempdir");
    let target = temp.path().to_path_buf();

    let unwound = panic::catch_unwind(AssertUnwindSafe(|| {
        with_current_dir(&target, || -> cmdwrap::Result<()> { panic!("closure panicked") })
    }));
    assert!(unwound.is_err());
    assert_eq!(env::current_dir().expect("cwd"), before);

    // The lock was poisoned by the panic; later callers still get through.
    let seen = with_current_dir(&target, || Ok(env::current_dir().expect("cwd")))
        .expect("lock recovered");
    assert_eq!(seen, target.canonicalize().expect("canonical"));
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[test]
fn missing_directory_leaves_cwd_alone() {
    let _serial = serial();
    let before = env::current_dir().expect("cwd");
    let temp = tempfile::tempdir().expect("tempdir");

    let err = with_current_dir(temp.path().join("missing"), || Ok(()))
        .expect_err("cannot chdir");
    assert!(matches!(err, Error::Io { .. }));
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[test]
fn run_at_invokes_inside_directory() {
    let _serial = serial();
    let before = env::current_dir().expect("cwd");
    let temp = tempfile::tempdir().expect("tempdir");
    let run_at = RunAt::new(InvocationSpec::new("sh").args(["-c", "touch \"$1\"", "sh"]));

    run_at.invoke(temp.path(), &["marker"]).expect("touch");
    assert!(temp.path().join("marker").is_file());

    let err = run_at
        .invoke(temp.path(), &["missing-dir/marker"])
        .expect_err("touch fails");
    assert!(matches!(err, Error::ExecutionFailed { reason: None }));
    assert_eq!(run_at.invoker().last_exit_code(), Some(1));
    assert_eq!(env::current_dir().expect("cwd"), before);
}

#[test]
fn copy_from_extracts_into_current_directory() {
    let _serial = serial();
    let src = sample_tree().expect("source tree");
    let dest = tempfile::tempdir().expect("dest");

    let files = with_current_dir(dest.path(), || copy_from(src.path(), &[] as &[&str]))
        .expect("copy");

    assert_eq!(
        fs::read_to_string(dest.path().join("sub/b.txt")).expect("b"),
        "bravo\n"
    );
    assert!(files.contains(&PathBuf::from("a.txt")));
}
