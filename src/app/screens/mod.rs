//! TUI screen components
//!
//! Contains individual screen implementations for different application states.

pub mod confirm;
pub mod data_entry;
pub mod history;
pub mod tracker;

pub use confirm::ConfirmResetScreen;
pub use data_entry::{DataEntryAction, DataEntryScreen};
pub use history::HistoryScreen;
pub use tracker::{TrackerCommand, TrackerScreen};

use crate::models::Color as PullColor;
use ratatui::style::{Color, Modifier, Style};

/// Severity of a status line message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Warning,
    Error,
}

/// One-line feedback shown under the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Info }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Warning }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: StatusKind::Error }
    }

    pub fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Warning => Style::default().fg(Color::Yellow),
            StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        }
    }
}

/// Terminal color used to draw a pull color
pub(crate) fn pull_color_style(color: PullColor) -> Style {
    match color {
        PullColor::White => Style::default().fg(Color::White),
        PullColor::Purple => Style::default().fg(Color::Magenta),
        PullColor::Gold => Style::default().fg(Color::Yellow),
    }
}

/// Step to the neighbouring color, starting from the ends when unset
pub(crate) fn cycle_color(current: Option<PullColor>, forward: bool) -> PullColor {
    match (current, forward) {
        (Some(color), true) => color.next(),
        (Some(color), false) => color.previous(),
        (None, true) => PullColor::White,
        (None, false) => PullColor::Gold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_color_from_unset() {
        assert_eq!(cycle_color(None, true), PullColor::White);
        assert_eq!(cycle_color(None, false), PullColor::Gold);
        assert_eq!(cycle_color(Some(PullColor::Purple), true), PullColor::Gold);
    }

    #[test]
    fn test_status_style() {
        assert_eq!(StatusMessage::info("ok").style().fg, Some(Color::Green));
        assert_eq!(StatusMessage::error("bad").kind, StatusKind::Error);
    }
}
