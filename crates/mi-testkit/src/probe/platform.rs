//! Platform facts: privilege gate and distribution label

use crate::assert::fail;
use crate::config::{HarnessConfig, ProbeConfig};

use super::ProbeError;

/// Whether privileged tests need effective uid 0 on this platform
pub const PRIVILEGES_REQUIRED: bool = !cfg!(target_os = "aix");

/// Effective user id of this process
pub fn effective_uid() -> Option<u32> {
    #[cfg(unix)]
    {
        Some(unsafe { libc::geteuid() })
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Privilege gate with every input explicit.
///
/// Passes when privileges are not required or `euid` is root; otherwise
/// logs a warning naming `test_name` and returns false.
pub fn prerequisites_met(test_name: &str, euid: Option<u32>, config: &ProbeConfig) -> bool {
    let required = config.require_privileges.unwrap_or(PRIVILEGES_REQUIRED);
    if !required || euid == Some(0) {
        return true;
    }
    log::warn!("Platform needs privileges to run {} test", test_name);
    false
}

/// Whether `test_name` may run as the current user. Tests that need root
/// call this first and return early (passing) when it says no.
pub fn meets_prerequisites(test_name: &str) -> bool {
    let config = HarnessConfig::load().unwrap_or_else(|e| {
        log::warn!("{}; using default probe settings", e);
        HarnessConfig::default()
    });
    prerequisites_met(test_name, effective_uid(), &config.probe)
}

/// Operating system name as reported by `uname`
pub fn sysname() -> Result<String, ProbeError> {
    #[cfg(unix)]
    {
        use std::ffi::CStr;
        let mut uts: libc::utsname = unsafe { std::mem::zeroed() };
        if unsafe { libc::uname(&mut uts) } < 0 {
            return Err(ProbeError::Uname(std::io::Error::last_os_error()));
        }
        // uname null-terminates every field
        let name = unsafe { CStr::from_ptr(uts.sysname.as_ptr()) };
        Ok(name.to_string_lossy().into_owned())
    }
    #[cfg(not(unix))]
    {
        Ok(std::env::consts::OS.to_string())
    }
}

#[cfg(target_os = "linux")]
const LINUX_DISTRIBUTION: &str = if cfg!(feature = "distro-suse") {
    "SuSE Distribution"
} else if cfg!(feature = "distro-redhat") {
    "Red Hat Distribution"
} else {
    "Linux Distribution"
};

/// Distribution label providers report for this build.
///
/// Linux builds report a label fixed at compile time by the `distro-*`
/// features; other systems report the `uname` system name.
#[track_caller]
pub fn distribution_name() -> String {
    #[cfg(target_os = "linux")]
    {
        LINUX_DISTRIBUTION.to_string()
    }
    #[cfg(not(target_os = "linux"))]
    {
        match sysname() {
            Ok(name) => name,
            Err(e) => fail(e),
        }
    }
}

/// Same as [`sysname`], failing the test on error
#[track_caller]
pub fn get_sysname() -> String {
    match sysname() {
        Ok(name) => name,
        Err(e) => fail(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requiring(required: Option<bool>) -> ProbeConfig {
        ProbeConfig {
            require_privileges: required,
            ..Default::default()
        }
    }

    #[test]
    fn test_root_always_passes() {
        assert!(prerequisites_met("Update", Some(0), &requiring(Some(true))));
        assert!(prerequisites_met("Update", Some(0), &requiring(None)));
    }

    #[test]
    fn test_unprivileged_user_blocked_when_required() {
        assert!(!prerequisites_met("Update", Some(1000), &requiring(Some(true))));
        assert!(!prerequisites_met("Update", None, &requiring(Some(true))));
    }

    #[test]
    fn test_override_lifts_requirement() {
        assert!(prerequisites_met("Update", Some(1000), &requiring(Some(false))));
    }

    #[test]
    fn test_platform_default() {
        assert_eq!(
            prerequisites_met("Update", Some(1000), &requiring(None)),
            !PRIVILEGES_REQUIRED
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_sysname() {
        let name = sysname().unwrap();
        assert!(!name.is_empty());
        assert_eq!(get_sysname(), name);
    }

    #[cfg(all(
        target_os = "linux",
        not(feature = "distro-suse"),
        not(feature = "distro-redhat")
    ))]
    #[test]
    fn test_default_linux_distribution() {
        assert_eq!(distribution_name(), "Linux Distribution");
    }
}
