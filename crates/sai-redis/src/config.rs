// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Client configuration.
//!
//! Supports both programmatic and file-based configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaiRedisConfig {
    /// Channel carrying create/set/remove and get requests.
    #[serde(default = "default_state_channel")]
    pub state_channel: String,

    /// Channel carrying get tombstones out and get responses back.
    #[serde(default = "default_get_response_channel")]
    pub get_response_channel: String,

    /// Bound on a single poll of the get-response channel (milliseconds).
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,

    /// Bound on a whole get call (milliseconds).
    #[serde(default = "default_get_deadline_ms")]
    pub get_deadline_ms: u64,

    /// Log level for the host's logger. The client never installs a logger
    /// or touches the global max level; feed [`Self::level_filter`] to
    /// whatever logger the host sets up.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_state_channel() -> String {
    "ASIC_STATE".to_string()
}

fn default_get_response_channel() -> String {
    "GETRESPONSE".to_string()
}

fn default_poll_timeout_ms() -> u64 {
    2000
}

fn default_get_deadline_ms() -> u64 {
    6000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SaiRedisConfig {
    fn default() -> Self {
        Self {
            state_channel: default_state_channel(),
            get_response_channel: default_get_response_channel(),
            poll_timeout_ms: default_poll_timeout_ms(),
            get_deadline_ms: default_get_deadline_ms(),
            log_level: default_log_level(),
        }
    }
}

impl SaiRedisConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state_channel.is_empty() || self.get_response_channel.is_empty() {
            return Err(ConfigError::Invalid("Channel names must not be empty".into()));
        }

        if self.state_channel == self.get_response_channel {
            return Err(ConfigError::Invalid(format!(
                "State and get-response channels are both {}",
                self.state_channel
            )));
        }

        if self.poll_timeout_ms == 0 || self.get_deadline_ms == 0 {
            return Err(ConfigError::Invalid("Timeouts must be non-zero".into()));
        }

        if self.get_deadline_ms < self.poll_timeout_ms {
            return Err(ConfigError::Invalid(format!(
                "Get deadline ({} ms) is shorter than one poll ({} ms)",
                self.get_deadline_ms, self.poll_timeout_ms
            )));
        }

        self.level_filter()?;
        Ok(())
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    pub fn get_deadline(&self) -> Duration {
        Duration::from_millis(self.get_deadline_ms)
    }

    /// `log_level` as a filter for whichever logger the host installs.
    pub fn level_filter(&self) -> Result<log::LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Unknown log level {}", self.log_level)))
    }
}
