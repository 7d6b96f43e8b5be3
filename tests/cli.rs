use std::path::Path;
use std::process::{Command, Output};

const KEY_FILE: &str = ".pagespeed_api_key";

/// Runs the binary with `HOME` (and the config dir) pointed at `home`, and an
/// endpoint nothing listens on so no test can reach the network.
fn run_in(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pagespeed"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("PAGESPEED_ENDPOINT", "http://127.0.0.1:9/runPagespeed")
        .env_remove("PAGESPEED_LOG")
        .output()
        .expect("run binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn version_flags_print_version_and_touch_nothing() {
    let home = tempfile::tempdir().unwrap();
    for flag in ["-v", "--version"] {
        let output = run_in(home.path(), &[flag]);
        assert!(output.status.success());
        assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));
    }
    assert!(!home.path().join(KEY_FILE).exists());
}

#[test]
fn help_prints_usage() {
    let home = tempfile::tempdir().unwrap();
    let output = run_in(home.path(), &["--help"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("--url"));
    assert!(text.contains("--strategy"));
    assert!(text.contains("add-key"));
}

#[test]
fn add_key_then_file_holds_key() {
    let home = tempfile::tempdir().unwrap();
    let output = run_in(home.path(), &["add-key", "ABC123"]);
    assert!(output.status.success());
    assert_eq!(
        std::fs::read_to_string(home.path().join(KEY_FILE)).unwrap(),
        "ABC123"
    );
}

#[test]
fn no_url_prints_usage_and_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run_in(home.path(), &[]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn unknown_flag_prints_usage_and_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = run_in(home.path(), &["--frobnicate"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("Usage:"));
}

#[test]
fn invalid_strategy_is_a_usage_error() {
    let home = tempfile::tempdir().unwrap();
    let output = run_in(home.path(), &["-u", "example.org", "-s", "tablet"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_key_prints_instructions_and_fails() {
    let home = tempfile::tempdir().unwrap();
    for args in [&["-u", "example.org"][..], &["example.org"][..]] {
        let output = run_in(home.path(), args);
        assert_eq!(output.status.code(), Some(1));
        let text = stdout(&output);
        assert!(text.contains("Looks like you don't have an API key"));
        assert!(text.contains("pagespeed add-key YOUR_KEY"));
    }
}

// dirs::config_dir() only honors XDG_CONFIG_HOME on Linux.
#[cfg(target_os = "linux")]
#[test]
fn broken_config_file_fails() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config").join("pagespeed");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "strategy = [").unwrap();
    std::fs::write(home.path().join(KEY_FILE), "KEY").unwrap();

    let output = run_in(home.path(), &["-u", "example.org"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration"));
}

#[cfg(target_os = "linux")]
#[test]
fn missing_key_is_reported_before_broken_config() {
    let home = tempfile::tempdir().unwrap();
    let config_dir = home.path().join(".config").join("pagespeed");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(config_dir.join("config.toml"), "strategy = [").unwrap();

    let output = run_in(home.path(), &["-u", "example.org"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("Looks like you don't have an API key"));
    assert!(!String::from_utf8_lossy(&output.stderr).contains("configuration"));
}
