#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the rpncalc-server binary
//!
//! These run the built binary and check configuration handling, help output
//! and a live request against a running server.

use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Helper to run the rpncalc-server binary with given arguments
fn run_rpncalc_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rpncalc-server"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute rpncalc-server")
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_str().unwrap().to_owned()
}

#[test]
fn test_cli_help_command() {
    let output = run_rpncalc_server(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rpncalc-server"), "Should contain binary name");
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"), "Should mention config option");
    assert!(stdout.contains("--port"), "Should mention port option");
}

#[test]
fn test_cli_version_command() {
    let output = run_rpncalc_server(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("rpncalc-server"), "Should contain binary name");
    assert!(
        stdout.chars().any(|c| c.is_ascii_digit()),
        "Should contain version numbers"
    );
}

#[test]
fn test_cli_invalid_command() {
    let output = run_rpncalc_server(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("error") || stderr.contains("unrecognized"),
        "Should contain error message about invalid command: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_rpncalc_server(&["--config", "/nonexistent/config.yaml", "check"]);

    assert!(
        !output.status.success(),
        "Should fail when config file doesn't exist"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("does not exist"),
        "Should indicate config file not found: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(&temp_dir, "invalid.yaml", "invalid: yaml: content: [unclosed");

    let output = run_rpncalc_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("configuration"),
        "Should mention configuration loading issue: {stderr}"
    );
}

#[test]
fn test_cli_config_validation_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "valid.yaml",
        r#"
server:
  bind_addr: "127.0.0.1:8123"
  request_timeout_secs: 10
logging:
  level: "warn"
calculator:
  max_tokens: 64
"#,
    );

    let output = run_rpncalc_server(&["--config", &config_path, "check"]);

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        eprintln!("STDERR: {stderr}");
    }
    assert!(output.status.success(), "Should succeed with valid config");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"), "stdout: {stdout}");
    assert!(stdout.contains("127.0.0.1:8123"), "stdout: {stdout}");
    assert!(stdout.contains("max_tokens: 64"), "stdout: {stdout}");
}

#[test]
fn test_cli_check_rejects_bad_bind_address() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "bad_addr.yaml",
        "server:\n  bind_addr: \"not-an-address\"\n",
    );

    let output = run_rpncalc_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with invalid bind address");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("address"), "stderr: {stderr}");
}

#[test]
fn test_cli_check_rejects_bad_log_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "bad_level.yaml",
        "logging:\n  level: \"=[bad\"\n",
    );

    let output = run_rpncalc_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with invalid log level");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("logging.level"), "stderr: {stderr}");
}

#[test]
fn test_cli_check_rejects_zero_max_tokens() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        &temp_dir,
        "zero_tokens.yaml",
        "calculator:\n  max_tokens: 0\n",
    );

    let output = run_rpncalc_server(&["--config", &config_path, "check"]);

    assert!(!output.status.success(), "Should fail with max_tokens of 0");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("max_tokens"), "stderr: {stderr}");
}

#[test]
fn test_cli_print_config_with_overrides() {
    let output = run_rpncalc_server(&["--print-config", "--port", "9555", "-vv"]);

    assert!(output.status.success(), "Print config should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bind_addr"), "stdout: {stdout}");
    assert!(stdout.contains("127.0.0.1:9555"), "stdout: {stdout}");
    assert!(stdout.contains("debug"), "stdout: {stdout}");

    let parsed: Result<std::collections::HashMap<String, serde_json::Value>, _> =
        serde_saphyr::from_str(&stdout);
    assert!(parsed.is_ok(), "Output should be valid YAML");
}

#[test]
fn test_cli_env_override() {
    let output = Command::new(env!("CARGO_BIN_EXE_rpncalc-server"))
        .args(["check"])
        .env("APP__CALCULATOR__MAX_TOKENS", "7")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute rpncalc-server");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("max_tokens: 7"), "stdout: {stdout}");
}

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}

async fn http_get(port: u16, path: &str) -> Option<String> {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.ok()?;
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.ok()?;
    let mut response = String::new();
    stream.read_to_string(&mut response).await.ok()?;
    Some(response)
}

#[tokio::test]
async fn test_cli_run_serves_requests() {
    let port = free_port();
    let port_arg = port.to_string();

    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_rpncalc-server"))
        .args(["--port", &port_arg, "run"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn rpncalc-server");

    let mut response = None;
    for _ in 0..50 {
        if let Some(r) = http_get(port, "/3/4/+/2/*").await {
            response = Some(r);
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let response = response.expect("server did not answer");
    assert!(response.starts_with("HTTP/1.1 200"), "response: {response}");
    assert!(response.contains("text/plain"), "response: {response}");
    assert!(response.ends_with("The answer is 14"), "response: {response}");

    let response = http_get(port, "/3/4").await.expect("server did not answer");
    assert!(response.starts_with("HTTP/1.1 400"), "response: {response}");
    assert!(response.contains("RPN_INCOMPLETE_EXPRESSION"), "response: {response}");

    child.kill().await.expect("Failed to stop rpncalc-server");
}

#[cfg(unix)]
#[tokio::test]
async fn test_cli_run_stops_on_sigterm() {
    let port = free_port();
    let port_arg = port.to_string();

    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_rpncalc-server"))
        .args(["--port", &port_arg, "run"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn rpncalc-server");

    let mut ready = false;
    for _ in 0..50 {
        if http_get(port, "/1").await.is_some() {
            ready = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert!(ready, "server did not answer");

    let pid = child.id().expect("child has a pid").to_string();
    let kill = Command::new("kill")
        .args(["-TERM", &pid])
        .status()
        .expect("Failed to run kill");
    assert!(kill.success());

    let status = tokio::time::timeout(Duration::from_secs(10), child.wait())
        .await
        .expect("server did not stop after SIGTERM")
        .expect("Failed to wait for rpncalc-server");
    assert!(status.success(), "exit status: {status}");
}
