//! Slot and color enumerations
//!
//! A pull always covers the same five slots; each slot draws one of three
//! colors.

use crate::{Result, SlotCountError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five fixed positions in a pull
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotId {
    Slot1,
    Slot2,
    Slot3,
    Slot4,
    Slot5,
}

impl SlotId {
    /// All slots in display order
    pub const ALL: [SlotId; 5] = [
        SlotId::Slot1,
        SlotId::Slot2,
        SlotId::Slot3,
        SlotId::Slot4,
        SlotId::Slot5,
    ];

    /// Look up a slot by its 1-based number
    pub fn from_number(number: usize) -> Result<Self> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or_else(|| SlotCountError::InvalidSlot(number.to_string()))
    }

    /// 1-based slot number
    pub fn number(&self) -> usize {
        self.index() + 1
    }

    /// 0-based position in `SlotId::ALL`
    pub fn index(&self) -> usize {
        match self {
            SlotId::Slot1 => 0,
            SlotId::Slot2 => 1,
            SlotId::Slot3 => 2,
            SlotId::Slot4 => 3,
            SlotId::Slot5 => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SlotId::Slot1 => "Slot1",
            SlotId::Slot2 => "Slot2",
            SlotId::Slot3 => "Slot3",
            SlotId::Slot4 => "Slot4",
            SlotId::Slot5 => "Slot5",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SlotId {
    type Err = SlotCountError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SlotCountError::InvalidSlot(s.to_string()))
    }
}

/// Outcome color of a single slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Purple,
    Gold,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::White, Color::Purple, Color::Gold];

    /// Gold ends a streak; White and Purple extend it
    pub fn resets_streak(&self) -> bool {
        matches!(self, Color::Gold)
    }

    /// Apply the streak rule to a counter value
    pub fn next_counter(&self, current: u32) -> u32 {
        if self.resets_streak() {
            0
        } else {
            current.saturating_add(1)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Purple => "Purple",
            Color::Gold => "Gold",
        }
    }

    /// Next color in cycling order, wrapping Gold back to White
    pub fn next(&self) -> Self {
        match self {
            Color::White => Color::Purple,
            Color::Purple => Color::Gold,
            Color::Gold => Color::White,
        }
    }

    /// Previous color in cycling order, wrapping White back to Gold
    pub fn previous(&self) -> Self {
        match self {
            Color::White => Color::Gold,
            Color::Purple => Color::White,
            Color::Gold => Color::Purple,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = SlotCountError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|color| color.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SlotCountError::InvalidColor(s.to_string()))
    }
}
