//! End-to-end tests driving the compiled `dispatch-demo` binary.
//!
//! Interactive paths are covered in the core crate with a scripted
//! input provider; these tests exercise the non-interactive argv
//! surface: named commands, aliases, help, and parse failures.

use std::process::Output;

fn run(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_dispatch-demo"))
        .args(args)
        .output()
        .expect("failed to run dispatch-demo")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_named_command_with_default_positional() {
    let out = run(&["hello"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "Hello, world!");
}

#[test]
fn test_short_alias_with_positional_value() {
    let out = run(&["hi", "crew"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "Hello, crew!");
}

#[test]
fn test_boolean_flag_changes_output() {
    let out = run(&["hello", "crew", "--loud"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "HELLO, CREW!");
}

#[test]
fn test_invalid_positional_number_exits_nonzero() {
    let out = run(&["server", "abc"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Invalid number \"abc\" for port"));
}

#[test]
fn test_missing_flag_value_exits_nonzero() {
    let out = run(&["server", "3000", "--timeout"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Missing value for --timeout"));
}

#[test]
fn test_value_flag_default_applies() {
    let out = run(&["create", "my-app"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "creating my-app from template basic");
}

#[test]
fn test_value_flag_override() {
    let out = run(&["create", "my-app", "--template", "web"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "creating my-app from template web");
}

#[test]
fn test_help_builtin_lists_commands() {
    for token in ["h", "help", "-h", "--help"] {
        let out = run(&[token]);
        assert!(out.status.success(), "{token} should exit 0");
        let text = stdout(&out);
        assert!(text.contains("Commands:"));
        assert!(text.contains("hello or hi"));
        assert!(text.contains("server or s"));
        assert!(text.contains("create or c"));
    }
}

#[test]
fn test_per_command_help_flag() {
    let out = run(&["server", "-h"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("server (s)"));
    assert!(text.contains("Usage: server [port]"));
    assert!(text.contains("--timeout"));
}

#[test]
fn test_unknown_command_dumps_overview_to_stderr() {
    let out = run(&["deploy"]);
    assert_eq!(out.status.code(), Some(1));
    let text = stderr(&out);
    assert!(text.contains("Unknown command: deploy"));
    assert!(text.contains("Commands:"));
}
