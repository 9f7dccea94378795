//! Integration tests for the `mitest` binary.

use std::path::PathBuf;
use std::process::{Command, Output};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn mitest(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mitest"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("MITEST_CONFIG")
        .output()
        .expect("failed to run mitest")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_inspect_prints_recorded_instances() {
    let fixture = fixtures_dir().join("agent.json");
    let output = mitest(&["inspect", fixture.to_str().unwrap()]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("TestableContext size: 3"));
    assert!(text.contains("Name: string = \"scx-2\" [key]"));
    assert!(text.contains("MIReturn: boolean = true"));
}

#[test]
fn test_inspect_expect_passes_for_class() {
    let fixture = fixtures_dir().join("agent.json");
    let output = mitest(&[
        "inspect",
        fixture.to_str().unwrap(),
        "--class",
        "SCX_Agent",
        "--expect",
        "Name,Id,VersionString",
    ]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("TestableContext size: 2"));
    assert_eq!(text.matches(" PASS ").count(), 2);
}

#[test]
fn test_inspect_expect_mismatch_fails() {
    let fixture = fixtures_dir().join("agent.json");
    let output = mitest(&["inspect", fixture.to_str().unwrap(), "--expect", "Name,Id"]);
    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains(" FAIL "));
    assert!(text.contains("VersionString"));
}

#[test]
fn test_inspect_missing_fixture() {
    let output = mitest(&["inspect", "/nonexistent/agent.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("/nonexistent/agent.json"));
}

#[cfg(unix)]
#[test]
fn test_probe_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("mitest.toml");
    std::fs::write(
        &config,
        "[probe]\nresolver_command = \"echo {host}.Test\"\nrequire_privileges = false\n",
    )
    .unwrap();

    let output = mitest(&["probe", "--fqdn", "--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Distribution:"));
    assert!(text.contains("privileged tests can run"));
    assert!(text.contains(".test"));
}
