//! Tests running the built executable

use std::io::Write;
use std::process::{Command, Output};

fn vips_version(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_vips-version"))
        .args(["--no-color"])
        .args(args)
        .output()
        .expect("failed to run vips-version")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_default_prints_short_version() {
    let output = vips_version(&[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "7.32.3\n");
}

#[test]
fn test_verbose_prints_long_version() {
    let output = vips_version(&["show", "--verbose"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("7.32.3-"), "got: {}", text);
    assert_eq!(text.trim_end(), vips_version::VERSION_STRING);
}

#[test]
fn test_triple() {
    assert_eq!(stdout(&vips_version(&["triple"])), "7 32 3\n");
}

#[test]
fn test_check_exit_status() {
    let ok = vips_version(&["check", "7.30"]);
    assert_eq!(ok.status.code(), Some(0));

    let incompatible = vips_version(&["check", "8.0"]);
    assert_eq!(incompatible.status.code(), Some(1));
    assert!(stdout(&incompatible).contains("incompatible"));

    let malformed = vips_version(&["check", "seven"]);
    assert_eq!(malformed.status.code(), Some(2));
    assert!(stderr(&malformed).contains("Invalid major version component"));
}

#[test]
fn test_compare() {
    assert_eq!(stdout(&vips_version(&["compare", "8.0.0"])), "less\n");
    assert_eq!(stdout(&vips_version(&["compare", "7.32.3"])), "equal\n");
    assert_eq!(stdout(&vips_version(&["compare", "7.32.2"])), "greater\n");
}

#[test]
fn test_config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("run.log");
    let config_path = dir.path().join("vips-version.toml");
    let mut config = std::fs::File::create(&config_path).unwrap();
    writeln!(config, "log-level = \"info\"").unwrap();
    writeln!(config, "log-format = \"json\"").unwrap();
    writeln!(config, "log-file = {:?}", log_path.to_string_lossy()).unwrap();
    drop(config);

    let output = vips_version(&["--config-file", config_path.to_str().unwrap(), "triple"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "7 32 3\n");

    // Level, format and file all come from the config
    let log = std::fs::read_to_string(&log_path).unwrap();
    let entries: Vec<serde_json::Value> = log
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert!(
        entries
            .iter()
            .any(|e| e["level"] == "INF" && e["message"].as_str().unwrap().contains("starting")),
        "got: {}",
        log
    );
    assert!(stderr(&output).is_empty(), "got: {}", stderr(&output));
}

#[test]
fn test_errors_reach_stderr_when_logging_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("errors.log");

    let output = vips_version(&["--log-file", log_path.to_str().unwrap(), "check", "seven"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr(&output).contains("Invalid major version component"),
        "got: {}",
        stderr(&output)
    );

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("FATAL"), "got: {}", log);
    assert!(log.contains("Invalid major version component"));
}

#[test]
fn test_missing_config_file_fails() {
    let output = vips_version(&["--config-file", "/nonexistent/vips-version.toml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("does not exist"));
}
