//! Tests for running external commands.
#![cfg(unix)]

use csa_cli::process::{RunOptions, run, run_script};
use csa_core::Error;
use tempfile::TempDir;

#[test]
fn test_stdout_is_captured() {
    let output = run("echo", &["hello", "world"], &RunOptions::new()).unwrap();
    assert_eq!(output, b"hello world\n");
}

#[test]
fn test_arguments_are_passed_verbatim() {
    let output = run("printf", &["%s|", "a b", "it's", "$HOME"], &RunOptions::new()).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "a b|it's|$HOME|");
}

#[test]
fn test_backslashes_are_passed_verbatim() {
    let output = run("printf", &["%s|", r"a\b", r"C:\dir\", "\"q\""], &RunOptions::new()).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), r#"a\b|C:\dir\|"q"|"#);
}

#[test]
fn test_missing_command() {
    let err = run("csa-definitely-not-a-command", &["--version"], &RunOptions::new()).unwrap_err();
    assert!(matches!(err, Error::CommandNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Could not find command \"csa-definitely-not-a-command\""
    );
}

#[test]
fn test_non_zero_exit_carries_stderr() {
    let err = run_script("echo boom >&2; exit 3", &RunOptions::new()).unwrap_err();
    assert_eq!(err.to_string(), "Failed to execute command \"echo\"");
    assert_eq!(err.problems(), vec!["boom".to_string()]);
}

#[test]
fn test_working_directory() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("marker.txt"), "").unwrap();

    let output = run("ls", &[], &RunOptions::new().cwd(temp_dir.path())).unwrap();
    assert_eq!(String::from_utf8(output).unwrap(), "marker.txt\n");
}

#[test]
fn test_inherited_stdout_is_not_captured() {
    let output = run("true", &[], &RunOptions::new().inherit_stdout()).unwrap();
    assert!(output.is_empty());
}
