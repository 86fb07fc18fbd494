// Copyright 2025 VersionUp Contributors (https://github.com/versionup/versionup)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Auto-saver configuration.
//!
//! Construction-time only: hosts build an [`AutoSaveConfig`] (or parse one
//! out of their own plugin config file) and hand it to the plugin at install.
//! There is no environment or CLI surface.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default delay between save attempts (80 minutes).
pub const DEFAULT_BACKUP_INTERVAL_SECS: u64 = 4800;

/// Default inactivity window after which a scheduled save is skipped (5 minutes).
pub const DEFAULT_IDLE_THRESHOLD_SECS: u64 = 300;

/// Configuration for the auto-saver.
///
/// # Example TOML
///
/// ```toml
/// backup_interval_secs = 1200
/// idle_threshold_secs = 300
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoSaveConfig {
    /// Seconds between save attempts.
    #[serde(default = "default_backup_interval")]
    pub backup_interval_secs: u64,

    /// Seconds of inactivity before a scheduled save is skipped.
    #[serde(default = "default_idle_threshold")]
    pub idle_threshold_secs: u64,
}

fn default_backup_interval() -> u64 {
    DEFAULT_BACKUP_INTERVAL_SECS
}

fn default_idle_threshold() -> u64 {
    DEFAULT_IDLE_THRESHOLD_SECS
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            backup_interval_secs: default_backup_interval(),
            idle_threshold_secs: default_idle_threshold(),
        }
    }
}

impl AutoSaveConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Set the backup interval.
    pub fn with_backup_interval_secs(mut self, secs: u64) -> Self {
        self.backup_interval_secs = secs;
        self
    }

    /// Set the idle threshold.
    pub fn with_idle_threshold_secs(mut self, secs: u64) -> Self {
        self.idle_threshold_secs = secs;
        self
    }

    /// Delay between save attempts as a [`Duration`].
    pub fn backup_interval(&self) -> Duration {
        Duration::from_secs(self.backup_interval_secs)
    }

    /// Idle threshold as a [`Duration`].
    pub fn idle_threshold(&self) -> Duration {
        Duration::from_secs(self.idle_threshold_secs)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backup_interval_secs == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "backup_interval_secs",
            });
        }
        if self.idle_threshold_secs == 0 {
            return Err(ConfigError::ZeroDuration {
                field: "idle_threshold_secs",
            });
        }
        Ok(())
    }
}

/// Errors that can occur while building a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },
}
