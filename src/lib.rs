//! SLOTCOUNT - five-slot gacha pull tracker
//!
//! Records the color drawn in each of five slots per pull, keeps a per-slot
//! streak counter of pulls since the last Gold, and persists the pull history
//! as JSON.

use std::fmt;

pub mod app;
pub mod config;
pub mod models;
pub mod tracker;

use models::SlotId;

// Common error types
#[derive(Debug)]
pub enum SlotCountError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// History file could not be read, parsed or written
    PersistenceError(String),
    /// A pull was confirmed before every slot had a color
    IncompleteSelection(Vec<SlotId>),
    /// Slot name outside Slot1..Slot5
    InvalidSlot(String),
    /// Color name outside White/Purple/Gold
    InvalidColor(String),
    /// Malformed `SLOT=COLOR[:COUNT]` data entry
    InvalidEntry(String),
    /// TUI rendering or interaction error
    TuiError(String),
}

impl fmt::Display for SlotCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotCountError::IoError(err) => write!(f, "I/O error: {}", err),
            SlotCountError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SlotCountError::PersistenceError(msg) => write!(f, "History persistence error: {}", msg),
            SlotCountError::IncompleteSelection(missing) => {
                let names: Vec<String> = missing.iter().map(|s| s.to_string()).collect();
                write!(f, "Incomplete selection: no color for {}", names.join(", "))
            }
            SlotCountError::InvalidSlot(name) => write!(f, "Invalid slot: {}", name),
            SlotCountError::InvalidColor(name) => write!(f, "Invalid color: {}", name),
            SlotCountError::InvalidEntry(entry) => write!(f, "Invalid data entry: {}", entry),
            SlotCountError::TuiError(msg) => write!(f, "TUI error: {}", msg),
        }
    }
}

impl std::error::Error for SlotCountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SlotCountError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SlotCountError {
    fn from(err: std::io::Error) -> Self {
        SlotCountError::IoError(err)
    }
}

impl From<serde_json::Error> for SlotCountError {
    fn from(err: serde_json::Error) -> Self {
        SlotCountError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::ser::Error> for SlotCountError {
    fn from(err: toml::ser::Error) -> Self {
        SlotCountError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for SLOTCOUNT operations
pub type Result<T> = std::result::Result<T, SlotCountError>;

/// Error handling utilities
pub mod error {
    use super::SlotCountError;

    /// True for caller contract violations that leave all state untouched
    pub fn is_user_input_error(error: &SlotCountError) -> bool {
        matches!(
            error,
            SlotCountError::IncompleteSelection(_)
                | SlotCountError::InvalidSlot(_)
                | SlotCountError::InvalidColor(_)
                | SlotCountError::InvalidEntry(_)
        )
    }

    /// Convert error to a message suitable for the status line
    pub fn user_friendly_message(error: &SlotCountError) -> String {
        match error {
            SlotCountError::IncompleteSelection(_) => {
                "Please select a color for all slots before confirming!".to_string()
            }
            SlotCountError::InvalidSlot(name) => {
                format!("Unknown slot '{}'. Use Slot1 to Slot5.", name)
            }
            SlotCountError::InvalidColor(name) => {
                format!("Unknown color '{}'. Use White, Purple or Gold.", name)
            }
            SlotCountError::InvalidEntry(entry) => {
                format!("Cannot read '{}'. Expected SLOT=COLOR or SLOT=COLOR:COUNT.", entry)
            }
            SlotCountError::PersistenceError(_) | SlotCountError::IoError(_) => {
                "Failed to save pull history. Check disk space and permissions.".to_string()
            }
            SlotCountError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            _ => error.to_string(),
        }
    }
}

// Common types and constants
pub const APP_NAME: &str = "slotcount";
pub const CONFIG_FILE: &str = "slotcount.toml";
pub const HISTORY_FILE: &str = "pull_history.json";
pub const LOG_FILE: &str = "slotcount.log";
pub const SLOT_COUNT: usize = 5;
