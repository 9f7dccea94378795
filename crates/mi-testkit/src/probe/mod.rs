//! Environment probes
//!
//! Tests that compare provider output against the machine they run on need
//! a few facts about the host: its fully-qualified name, the distribution
//! label, and whether the current user may run privileged tests.

pub mod fqdn;
pub mod platform;
pub mod runner;

pub use fqdn::{get_fq_host_name, local_host_name, resolve_fq_host_name, resolve_fq_host_name_of};
pub use platform::{
    distribution_name, effective_uid, get_sysname, meets_prerequisites, prerequisites_met, sysname,
    PRIVILEGES_REQUIRED,
};
pub use runner::{ProcessOutput, ProcessRunner, ShellRunner, TIMEOUT_STATUS};

use thiserror::Error;

/// Errors raised while probing the host
#[derive(Debug, Error)]
pub enum ProbeError {
    /// gethostname failed
    #[error("gethostname failed: {0}")]
    HostName(#[source] std::io::Error),

    /// uname failed
    #[error("uname failed: {0}")]
    Uname(#[source] std::io::Error),

    /// Command could not be started or waited on
    #[error("failed to run {command}: {source}")]
    Spawn {
        /// Command line
        command: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Command exited non-zero or ran out of time
    #[error("{command} exited with status {status}; stderr: {stderr}")]
    Status {
        /// Command line
        command: String,
        /// Exit status
        status: i32,
        /// Captured stderr
        stderr: String,
    },

    /// Command succeeded but wrote to stderr
    #[error("{command} wrote to stderr: {stderr}")]
    Stderr {
        /// Command line
        command: String,
        /// Captured stderr
        stderr: String,
    },
}
