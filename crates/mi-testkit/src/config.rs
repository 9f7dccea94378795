//! Harness configuration (mitest.toml)
//!
//! Every key is optional; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "MITEST_CONFIG";

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "mitest.toml";

/// Placeholder replaced by the local host name in the resolver command
pub const HOST_PLACEHOLDER: &str = "{host}";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Validation error
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Top-level harness configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Environment probe settings
    #[serde(default)]
    pub probe: ProbeConfig,
}

/// `[probe]` section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProbeConfig {
    /// Shell command printing the fully-qualified name of `{host}`
    #[serde(default = "default_resolver_command")]
    pub resolver_command: String,

    /// How long the resolver may run, in milliseconds
    #[serde(default = "default_resolver_timeout_ms")]
    pub resolver_timeout_ms: u64,

    /// Whether privileged tests need effective uid 0 (platform default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_privileges: Option<bool>,
}

fn default_resolver_command() -> String {
    "nslookup {host} | grep 'Name:' | awk '{print $2}'".to_string()
}

fn default_resolver_timeout_ms() -> u64 {
    15_000
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            resolver_command: default_resolver_command(),
            resolver_timeout_ms: default_resolver_timeout_ms(),
            require_privileges: None,
        }
    }
}

impl ProbeConfig {
    /// Resolver timeout as a `Duration`
    pub fn resolver_timeout(&self) -> Duration {
        Duration::from_millis(self.resolver_timeout_ms)
    }

    /// Resolver command with `{host}` substituted
    pub fn resolver_command_for(&self, host: &str) -> String {
        self.resolver_command.replace(HOST_PLACEHOLDER, host)
    }
}

impl HarnessConfig {
    /// Load from file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse from string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: HarnessConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.probe.resolver_command.contains(HOST_PLACEHOLDER) {
            return Err(ConfigError::ValidationError(format!(
                "probe.resolver_command must contain {}",
                HOST_PLACEHOLDER
            )));
        }
        if self.probe.resolver_timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "probe.resolver_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Path the config would be loaded from, if any exists
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = PathBuf::from(CONFIG_FILE);
        local.is_file().then_some(local)
    }

    /// Load from `$MITEST_CONFIG`, then `./mitest.toml`, else defaults.
    ///
    /// An explicitly named file that cannot be read is an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => {
                log::debug!("loading harness config from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
