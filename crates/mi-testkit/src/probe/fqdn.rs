//! Host name and fully-qualified host name

use crate::assert::fail;
use crate::config::{HarnessConfig, ProbeConfig};

use super::runner::{ProcessRunner, ShellRunner};
use super::ProbeError;

/// Short host name of this machine
pub fn local_host_name() -> Result<String, ProbeError> {
    #[cfg(unix)]
    {
        use std::ffi::CStr;
        let mut buf = [0u8; 256];
        let ret = unsafe { libc::gethostname(buf.as_mut_ptr() as *mut libc::c_char, buf.len()) };
        if ret != 0 {
            return Err(ProbeError::HostName(std::io::Error::last_os_error()));
        }
        // Truncated names are not guaranteed to be terminated.
        buf[buf.len() - 1] = 0;
        let cstr = unsafe { CStr::from_ptr(buf.as_ptr() as *const libc::c_char) };
        Ok(cstr.to_string_lossy().into_owned())
    }
    #[cfg(not(unix))]
    {
        std::env::var("COMPUTERNAME").map_err(|e| {
            ProbeError::HostName(std::io::Error::new(std::io::ErrorKind::NotFound, e))
        })
    }
}

/// Fully-qualified, lower-cased name of `host` as printed by the resolver.
///
/// A non-zero exit, a timeout, or any stderr output is a failure. Empty
/// output is returned as-is.
pub fn resolve_fq_host_name_of(
    runner: &dyn ProcessRunner,
    config: &ProbeConfig,
    host: &str,
) -> Result<String, ProbeError> {
    let command = config.resolver_command_for(host);
    let output = runner
        .run(&command, config.resolver_timeout())
        .map_err(|source| ProbeError::Spawn {
            command: command.clone(),
            source,
        })?;
    if !output.success() {
        return Err(ProbeError::Status {
            command,
            status: output.status,
            stderr: output.stderr,
        });
    }
    if !output.stderr.is_empty() {
        return Err(ProbeError::Stderr {
            command,
            stderr: output.stderr,
        });
    }
    let fqdn = output.stdout.trim().to_lowercase();
    log::debug!("{} resolves to {:?}", host, fqdn);
    Ok(fqdn)
}

/// Fully-qualified, lower-cased name of this machine
pub fn resolve_fq_host_name(
    runner: &dyn ProcessRunner,
    config: &ProbeConfig,
) -> Result<String, ProbeError> {
    let host = local_host_name()?;
    resolve_fq_host_name_of(runner, config, &host)
}

/// Fully-qualified host name using the harness config and `sh`; any
/// failure fails the test.
#[track_caller]
pub fn get_fq_host_name() -> String {
    let config = match HarnessConfig::load() {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    match resolve_fq_host_name(&ShellRunner, &config.probe) {
        Ok(fqdn) => fqdn,
        Err(e) => fail(format_args!("In get_fq_host_name(): {}", e)),
    }
}
