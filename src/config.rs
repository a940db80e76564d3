// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration module.
//!
//! Handles loading discovery and command-file settings. The slider's device
//! name and channel are fixed and not part of the configuration.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::bluetooth::constants::{DEFAULT_DISCOVERY_SECS, DEFAULT_NAME_TIMEOUT_SECS};

/// Directory name under the user's config directory.
const APP_DIR: &str = "bluetooth-slider";

/// Command file written by the slider UI.
pub const DEFAULT_COMMAND_PATH: &str = "/home/pi/temp/bluetooth.txt";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discovery settings.
    pub discovery: DiscoveryConfig,

    /// Command file settings.
    pub command: CommandConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// How long to scan, in seconds.
    pub duration_secs: u64,

    /// Drop cached unpaired devices before scanning.
    pub flush_cache: bool,

    /// Upper bound for each name lookup, in seconds.
    pub name_timeout_secs: u64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DISCOVERY_SECS,
            flush_cache: true,
            name_timeout_secs: DEFAULT_NAME_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// File holding the command to send.
    pub path: PathBuf,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_COMMAND_PATH),
        }
    }
}

/// Discovery parameters in the form the scanner consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoverySettings {
    pub duration: Duration,
    pub flush_cache: bool,
    pub name_timeout: Duration,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        DiscoveryConfig::default().settings()
    }
}

impl DiscoveryConfig {
    pub fn settings(&self) -> DiscoverySettings {
        DiscoverySettings {
            duration: Duration::from_secs(self.duration_secs),
            flush_cache: self.flush_cache,
            name_timeout: Duration::from_secs(self.name_timeout_secs),
        }
    }
}

impl Config {
    /// Path of the user's config file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load configuration from the user's config file or fall back to defaults.
    ///
    /// The file is never created.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid config in {}", path.display()))?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.command.path, PathBuf::from("/home/pi/temp/bluetooth.txt"));

        let settings = config.discovery.settings();
        assert_eq!(settings.duration, Duration::from_secs(8));
        assert!(settings.flush_cache);
        assert_eq!(settings.name_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[discovery]\nduration_secs = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.discovery.duration_secs, 4);
        assert!(config.discovery.flush_cache);
        assert_eq!(config.discovery.name_timeout_secs, 10);
        assert_eq!(config.command.path, PathBuf::from(DEFAULT_COMMAND_PATH));
    }

    #[test]
    fn test_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[discovery]\nduration_secs = 3\nflush_cache = false\nname_timeout_secs = 2\n\n\
             [command]\npath = \"/tmp/slider.txt\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let settings = config.discovery.settings();
        assert_eq!(settings.duration, Duration::from_secs(3));
        assert!(!settings.flush_cache);
        assert_eq!(settings.name_timeout, Duration::from_secs(2));
        assert_eq!(config.command.path, PathBuf::from("/tmp/slider.txt"));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[discovery]\nduration_secs = \"long\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
