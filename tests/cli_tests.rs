use assert_cmd::Command;
use predicates::prelude::*;

const VIDEO_URL: &str = "https://youtu.be/dQw4w9WgXcQ";

fn clipx() -> Command {
    let mut cmd = Command::cargo_bin("clipx").unwrap();
    for (name, _) in clipx_cli::config_initialization::ENV_MAPPINGS {
        cmd.env_remove(name);
    }
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    clipx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("info"))
        .stdout(predicate::str::contains("clip"));
}

#[test]
fn test_unsupported_url_fails_without_network() {
    clipx()
        .args(["--server", "http://127.0.0.1:9", "clip", "https://example.com/watch?v=dQw4w9WgXcQ"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid URL"));
}

#[test]
fn test_malformed_time_is_rejected() {
    clipx()
        .args(["clip", VIDEO_URL, "--start", "1:99"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid time format: 1:99"));
}

#[test]
fn test_unknown_log_format_is_rejected() {
    clipx()
        .args(["--log-format", "xml", "info", VIDEO_URL])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid log format"));
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");

    clipx()
        .arg("--config")
        .arg(&missing)
        .args(["info", VIDEO_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_invalid_config_value_fails() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("clipx.toml");
    std::fs::write(&path, "[clipx]\npoll_interval_ms = 0\n").unwrap();

    clipx()
        .arg("--config")
        .arg(&path)
        .args(["info", VIDEO_URL])
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_ms"));
}

#[test]
fn test_unreachable_server_is_a_network_error() {
    clipx()
        .args(["--server", "http://127.0.0.1:9", "info", VIDEO_URL])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Network error"));
}
