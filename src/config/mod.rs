//! Configuration management module
//!
//! Handles loading, saving, and validation of tracker settings
//! and the location of the pull history file.

use std::path::{Path, PathBuf};
use std::fs;
use serde::{Deserialize, Serialize};
use crate::{SlotCountError, Result, APP_NAME, CONFIG_FILE, HISTORY_FILE};

pub mod persistence;

pub use persistence::HistoryStorage;

/// Tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// History file, relative to the working directory unless absolute
    pub history_path: PathBuf,
    /// Whether data-entry pulls also overwrite the live streak counters
    pub data_pull_updates_counters: bool,
    /// Seed live counters from the newest history record at startup
    pub restore_counters_from_history: bool,
    /// Maximum number of records shown in the history list
    pub history_display_limit: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(HISTORY_FILE),
            data_pull_updates_counters: false,
            restore_counters_from_history: false,
            history_display_limit: 100,
        }
    }
}

impl TrackerConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.history_path.as_os_str().is_empty() {
            return Err(SlotCountError::ConfigError(
                "History path must not be empty".to_string()
            ));
        }

        if self.history_path.is_dir() {
            return Err(SlotCountError::ConfigError(
                format!("History path is a directory: {}", self.history_path.display())
            ));
        }

        if self.history_display_limit == 0 {
            return Err(SlotCountError::ConfigError(
                "History display limit must be greater than 0".to_string()
            ));
        }

        Ok(())
    }

    /// Set the history file path
    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Set whether data pulls update live counters
    pub fn with_data_pull_updates_counters(mut self, enabled: bool) -> Self {
        self.data_pull_updates_counters = enabled;
        self
    }

    /// Set whether startup restores counters from history
    pub fn with_restore_counters_from_history(mut self, enabled: bool) -> Self {
        self.restore_counters_from_history = enabled;
        self
    }

    /// Set the history list length
    pub fn with_history_display_limit(mut self, limit: usize) -> Self {
        self.history_display_limit = limit;
        self
    }

    /// Storage manager for the configured history file
    pub fn history_storage(&self) -> HistoryStorage {
        HistoryStorage::new(self.history_path.clone())
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| SlotCountError::ConfigError(
                format!("Failed to read config file {}: {}", config_path.display(), e)
            ))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| SlotCountError::ConfigError(
                format!("Failed to parse config file {}: {}", config_path.display(), e)
            ))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SlotCountError::ConfigError(
                    format!("Failed to create config directory {}: {}", parent.display(), e)
                ))?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(config_path, content)
            .map_err(|e| SlotCountError::ConfigError(
                format!("Failed to write config file {}: {}", config_path.display(), e)
            ))?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/slotcount/slotcount.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SlotCountError::ConfigError(
                "Unable to determine config directory".to_string()
            ))?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for auxiliary files such as the TUI log
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SlotCountError::ConfigError(
                "Unable to determine data directory".to_string()
            ))?;

        Ok(data_dir.join(APP_NAME))
    }
}
