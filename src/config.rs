//! # Configuration
//!
//! Settings for the `kittymux` server, resolved in this order (later wins):
//!
//! 1. built-in defaults,
//! 2. an optional YAML file,
//! 3. environment variables,
//! 4. command-line flags (applied by the binary).
//!
//! ## YAML
//!
//! ```yaml
//! server:
//!   addr: "0.0.0.0:8080"
//!   stack_size: 16384
//! logging:
//!   level: info
//!   format: json
//!   async: false
//! ```
//!
//! ## Environment Variables
//!
//! - `KITTY_ADDR`: listen address
//! - `KITTY_STACK_SIZE`: coroutine stack size, decimal (`16384`) or hex (`0x4000`)
//! - `KITTY_LOG_*`: see [`crate::logging`]
//!
//! The stack size bounds how deep a handler's call chain may go. Each
//! in-flight request runs on its own coroutine stack, so memory use is
//! roughly `stack_size × concurrent requests`.

use crate::logging::{LogConfig, LogFormat};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Default coroutine stack size (16 KB).
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub addr: String,
    pub stack_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    #[serde(rename = "async")]
    pub async_logging: bool,
    pub filter: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let log = LogConfig::default();
        Self {
            level: log.log_level,
            format: log.format,
            async_logging: log.async_logging,
            filter: log.target_filter,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Parse a stack size given in decimal or `0x`-prefixed hex.
#[must_use]
pub fn parse_stack_size(value: &str) -> Option<usize> {
    let value = value.trim();
    match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

impl AppConfig {
    /// Parse a YAML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Fails on malformed YAML or unknown keys.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Invalid configuration")
    }

    /// Read and parse the YAML file at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Defaults or the file at `path`, then the process environment.
    ///
    /// # Errors
    ///
    /// Propagates [`AppConfig::load`] failures.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(|key| env::var(key).ok()))
    }

    /// Apply environment-style overrides from `lookup`.
    ///
    /// An unparsable `KITTY_STACK_SIZE` is ignored.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup("KITTY_ADDR") {
            self.server.addr = addr;
        }
        if let Some(size) = lookup("KITTY_STACK_SIZE").as_deref().and_then(parse_stack_size) {
            self.server.stack_size = size;
        }

        let log = self.log_config().with_overrides(lookup);
        self.logging = LoggingConfig {
            level: log.log_level,
            format: log.format,
            async_logging: log.async_logging,
            filter: log.target_filter,
        };
        self
    }

    /// Logging settings in the form [`crate::logging`] consumes.
    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            log_level: self.logging.level.clone(),
            format: self.logging.format,
            async_logging: self.logging.async_logging,
            target_filter: self.logging.filter.clone(),
            ..LogConfig::default()
        }
    }
}
