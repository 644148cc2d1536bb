//! Integration tests for the `oneshot` binary.
//!
//! These run the compiled binary with an isolated config directory so the
//! developer's own config file is never read or written.

use std::process::{Command, Output};

use serde_json::Value;

fn oneshot(config_home: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_oneshot"))
        .args(args)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run oneshot binary")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "oneshot failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn plan_command_prints_orientation_sheet() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = oneshot(
        tmp.path(),
        &[
            "plan",
            "--scenario",
            "UCLA orientation tasks",
            "--preferred-name",
            "Ana",
            "--term",
            "Fall 2024",
        ],
    );
    let json = stdout_json(&output);
    assert_eq!(json["mode"], "ask-once-no-chat-demo");
    assert_eq!(json["title"], "UCLA Post-Arrival Orientation Command Sheet");
    assert_eq!(json["action_sheet"].as_array().map(Vec::len), Some(5));
    let summary = json["summary"].as_str().unwrap();
    assert!(summary.contains("Hi Ana"), "summary: {summary}");
    assert!(summary.contains("Fall 2024"), "summary: {summary}");
}

#[test]
fn plan_command_without_fields_prints_fallback() {
    let tmp = tempfile::TempDir::new().unwrap();
    let json = stdout_json(&oneshot(tmp.path(), &["plan"]));
    assert_eq!(json["title"], "One-shot automation placeholder");
    assert_eq!(json["echo"], "");
}

#[test]
fn plan_command_text_format() {
    let tmp = tempfile::TempDir::new().unwrap();
    let output = oneshot(
        tmp.path(),
        &["plan", "--request", "help me plan a Tokyo trip", "--format", "text"],
    );
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.starts_with("One-shot automation placeholder"), "got: {text}");
    assert!(text.contains("You asked: help me plan a Tokyo trip"), "got: {text}");
}

#[test]
fn init_writes_config_and_refuses_overwrite() {
    let tmp = tempfile::TempDir::new().unwrap();

    let first = oneshot(tmp.path(), &["init", "--bind", "127.0.0.1", "--port", "8081"]);
    assert!(
        first.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&first.stderr)
    );

    let written = std::fs::read_to_string(tmp.path().join("oneshot/config.toml")).unwrap();
    let parsed: toml::Value = toml::from_str(&written).unwrap();
    assert_eq!(parsed["server"]["bind"].as_str(), Some("127.0.0.1"));
    assert_eq!(parsed["server"]["port"].as_integer(), Some(8081));

    let second = oneshot(tmp.path(), &["init"]);
    assert!(!second.status.success(), "second init should fail without --force");
    let stderr = String::from_utf8_lossy(&second.stderr);
    assert!(stderr.contains("already exists"), "stderr: {stderr}");

    let forced = oneshot(tmp.path(), &["init", "--force", "--port", "9090"]);
    assert!(forced.status.success());
    let written = std::fs::read_to_string(tmp.path().join("oneshot/config.toml")).unwrap();
    assert!(written.contains("9090"), "config: {written}");
}
