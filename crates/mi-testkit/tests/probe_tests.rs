//! Integration tests for the environment probes
//!
//! This binary is the only one that sets `MITEST_CONFIG`, and does so from
//! a single test, so no other test observes the change.

use std::io::Write;
use std::time::Duration;

use mi_testkit::config::CONFIG_ENV;
use mi_testkit::probe::{self, ProcessRunner, ShellRunner};
use mi_testkit::{HarnessConfig, ProbeConfig};
use tempfile::NamedTempFile;

#[cfg(unix)]
#[test]
fn test_shell_resolver_end_to_end() {
    let config = ProbeConfig {
        resolver_command: "echo {host}.Example.COM".to_string(),
        ..Default::default()
    };
    let host = probe::local_host_name().unwrap();
    let fqdn = probe::resolve_fq_host_name(&ShellRunner, &config).unwrap();
    assert_eq!(fqdn, format!("{}.example.com", host.to_lowercase()));
}

#[cfg(unix)]
#[test]
fn test_shell_resolver_stderr_fails() {
    let config = ProbeConfig {
        resolver_command: "echo {host}; echo warning >&2".to_string(),
        ..Default::default()
    };
    let err = probe::resolve_fq_host_name(&ShellRunner, &config).unwrap_err();
    assert!(err.to_string().contains("warning"));
}

#[cfg(unix)]
#[test]
fn test_shell_runner_timeout() {
    let out = ShellRunner
        .run("sleep 3", Duration::from_millis(50))
        .unwrap();
    assert!(out.timed_out);
    assert!(!out.success());
}

#[cfg(unix)]
#[test]
fn test_hung_resolver_pipeline_times_out() {
    let config = ProbeConfig {
        resolver_command: "sleep 5 | echo {host}.example.com".to_string(),
        resolver_timeout_ms: 100,
        ..Default::default()
    };
    let start = std::time::Instant::now();
    let err = probe::resolve_fq_host_name(&ShellRunner, &config).unwrap_err();
    assert!(start.elapsed() < Duration::from_secs(3));
    match err {
        probe::ProbeError::Status { status, .. } => assert_eq!(status, probe::TIMEOUT_STATUS),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_distribution_name_not_empty() {
    assert!(!probe::distribution_name().is_empty());
}

#[cfg(unix)]
#[test]
fn test_config_from_env_drives_probes() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[probe]").unwrap();
    writeln!(file, "resolver_command = \"echo {{host}}.LOCAL\"").unwrap();
    writeln!(file, "require_privileges = false").unwrap();

    std::env::set_var(CONFIG_ENV, file.path());
    let config = HarnessConfig::load().unwrap();
    assert_eq!(config.probe.require_privileges, Some(false));
    assert!(probe::meets_prerequisites("Update"));

    let host = probe::local_host_name().unwrap();
    assert_eq!(
        probe::get_fq_host_name(),
        format!("{}.local", host.to_lowercase())
    );

    std::env::set_var(CONFIG_ENV, "/nonexistent/mitest.toml");
    assert!(HarnessConfig::load().is_err());
    std::env::remove_var(CONFIG_ENV);
}
