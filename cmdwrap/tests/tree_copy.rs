//! Piped tar copy between two directories.
#![cfg(unix)]

use std::fs;
use std::path::PathBuf;

use cmdwrap::test_support::sample_tree;
use cmdwrap::{Error, TreeCopy, copy_into};

#[test]
fn copies_whole_tree_and_lists_paths() {
    let src = sample_tree().expect("source tree");
    let dest = tempfile::tempdir().expect("dest");

    let files = copy_into(src.path(), dest.path(), &[] as &[&str]).expect("copy");

    assert_eq!(
        fs::read(dest.path().join("a.txt")).expect("a"),
        fs::read(src.path().join("a.txt")).expect("a src")
    );
    assert_eq!(
        fs::read(dest.path().join("sub/b.txt")).expect("b"),
        fs::read(src.path().join("sub/b.txt")).expect("b src")
    );
    assert!(files.contains(&PathBuf::from("a.txt")), "{files:?}");
    assert!(files.contains(&PathBuf::from("sub/b.txt")), "{files:?}");
    assert!(files.iter().all(|p| !p.as_os_str().is_empty()));
    assert!(!files.contains(&PathBuf::from(".")));
}

#[test]
fn exclude_filter_skips_matching_paths() {
    let src = sample_tree().expect("source tree");
    let dest = tempfile::tempdir().expect("dest");

    let files = copy_into(src.path(), dest.path(), &["sub/*"]).expect("copy");

    assert!(dest.path().join("a.txt").is_file());
    assert!(!dest.path().join("sub/b.txt").exists());
    assert!(!files.contains(&PathBuf::from("sub/b.txt")), "{files:?}");
}

#[test]
fn missing_destination_is_a_single_copy_error() {
    let src = sample_tree().expect("source tree");
    let dest = tempfile::tempdir().expect("dest");

    let err = copy_into(src.path(), dest.path().join("missing"), &[] as &[&str])
        .expect_err("invalid destination");
    assert!(matches!(err, Error::CopyFailed(_)));
    assert!(err.to_string().starts_with("Cannot copy files"));
}

#[test]
fn failing_consumer_discards_output() {
    let src = sample_tree().expect("source tree");
    let dest = tempfile::tempdir().expect("dest");

    let err = TreeCopy::with_programs("tar", "false")
        .copy(src.path(), Some(dest.path()), &[] as &[&str])
        .expect_err("consumer exits 1");
    assert_eq!(err.to_string(), "Cannot copy files, pipe failed.");
}

#[test]
fn failing_producer_is_a_copy_error() {
    let dest = tempfile::tempdir().expect("dest");
    let err = TreeCopy::default()
        .copy(
            &dest.path().join("no-such-source"),
            Some(dest.path()),
            &[] as &[&str],
        )
        .expect_err("missing source");
    assert!(matches!(err, Error::CopyFailed(_)));
}
