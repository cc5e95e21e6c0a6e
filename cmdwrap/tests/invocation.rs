//! Strict and lenient invocation contracts, observed through real children.
//!
//! Every test runs `sh` with a short script, so these assume a Unix host.
#![cfg(unix)]

use std::fs;

use cmdwrap::test_support::LogBuf;
use cmdwrap::{Error, InvocationSpec, Invoker};

/// `sh -c <script> sh <call args...>`: call args become `$1..$n`.
fn sh(script: &str) -> Invoker {
    Invoker::new(InvocationSpec::new("sh").args(["-c", script, "sh"]))
}

#[test]
fn dispatches_fixed_args_then_call_args_in_order() {
    let temp = tempfile::tempdir().expect("tempdir");
    let out = temp.path().join("argv");
    let invoker = Invoker::new(
        InvocationSpec::new("sh")
            .args(["-c", "printf '%s\\n' \"$@\" > \"$OUT\"", "sh"])
            .args(["fixed-1", "dup", "fixed-2"])
            .env("OUT", &out),
    );

    invoker.invoke(&["dup", "call-1", "fixed-1"]).expect("invoke");

    let argv = fs::read_to_string(&out).expect("read argv");
    let lines: Vec<&str> = argv.lines().collect();
    assert_eq!(
        lines,
        vec!["fixed-1", "dup", "fixed-2", "dup", "call-1", "fixed-1"]
    );
}

#[test]
fn strict_success_logs_no_errors() {
    let (logs, _guard) = LogBuf::capture();
    sh("exit 0").invoke(&[] as &[&str]).expect("exit 0");
    assert!(logs.error_lines().is_empty(), "{}", logs.contents());
    assert!(logs.contains("DEBUG"), "expected a debug trace line");
}

#[test]
fn strict_nonzero_logs_code_and_fails_once() {
    let (logs, _guard) = LogBuf::capture();
    let invoker = sh("exit $1");
    for code in [1, 2, 42] {
        let err = invoker
            .invoke(&[code.to_string()])
            .expect_err("nonzero exit");
        assert!(matches!(err, Error::ExecutionFailed { reason: None }));
        assert!(
            logs.error_lines()
                .iter()
                .any(|line| line.contains(&format!("sh returned {code}"))),
            "{}",
            logs.contents()
        );
    }
}

#[test]
fn strict_failure_logs_the_wrapper_message() {
    let (logs, _guard) = LogBuf::capture();
    let invoker = Invoker::new(
        InvocationSpec::new("sh")
            .args(["-c", "exit 3"])
            .failure_message("Couldn't frobnicate \"thing\""),
    );
    invoker.invoke(&[] as &[&str]).expect_err("exit 3");
    let errors = logs.error_lines();
    assert!(errors.len() >= 2, "{errors:?}");
    assert!(errors.last().expect("line").contains("Couldn't frobnicate \"thing\""));
}

#[test]
fn strict_signal_names_signal_and_uses_same_error_kind() {
    let (logs, _guard) = LogBuf::capture();
    let err = sh("kill -KILL $$").invoke(&[] as &[&str]).expect_err("killed");
    assert!(matches!(err, Error::ExecutionFailed { reason: None }));
    assert!(logs.contains("sh was terminated by signal 9"), "{}", logs.contents());
}

#[test]
fn strict_launch_failure_is_logged_and_raised() {
    let (logs, _guard) = LogBuf::capture();
    let invoker = Invoker::new(InvocationSpec::new("/foo/bar"));
    let err = invoker.invoke(&[] as &[&str]).expect_err("missing binary");
    assert!(matches!(err, Error::ExecutionFailed { reason: None }));
    assert!(logs.contains("Execution failed:"), "{}", logs.contents());
    assert!(logs.contains("Couldn't run '/foo/bar'"), "{}", logs.contents());
}

#[test]
fn lenient_returns_every_code_without_error_logs() {
    let (logs, _guard) = LogBuf::capture();
    let invoker = sh("exit $1");
    for code in [0, 1, 2, 126, 255] {
        let outcome = invoker.run(&[code.to_string()]).expect("lenient run");
        assert_eq!(outcome.exit_code, code);
        assert_eq!(invoker.last_exit_code(), Some(code));
    }
    assert!(logs.error_lines().is_empty(), "{}", logs.contents());
}

#[test]
fn lenient_only_raises_on_launch_failure() {
    let err = Invoker::new(InvocationSpec::new("/foo/bar"))
        .run(&["foo", "bar"])
        .expect_err("missing binary");
    let Error::ExecutionFailed { reason: Some(reason) } = err else {
        panic!("expected launch failure with reason");
    };
    assert!(reason.starts_with("Execution failed: "), "{reason}");
}

#[test]
fn lenient_reports_signal_as_negative_code() {
    let outcome = sh("kill -TERM $$").run(&[] as &[&str]).expect("run");
    assert!(outcome.signaled());
    assert_eq!(outcome.exit_code, -15);
}
