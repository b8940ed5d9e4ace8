//! Parsing of textual data-pull entries such as `Slot2=Gold:0` or `3=White`

use crate::models::{Color, SlotId};
use crate::{Result, SlotCountError};
use std::collections::BTreeMap;

/// One slot of a data pull
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataEntry {
    pub slot: SlotId,
    pub color: Color,
    pub count: Option<u32>,
}

impl DataEntry {
    /// Parse `SLOT=COLOR[:COUNT]`; SLOT is a name (`Slot1`) or number (`1`)
    pub fn parse(raw: &str) -> Result<Self> {
        let (slot_part, rest) = raw
            .split_once('=')
            .ok_or_else(|| SlotCountError::InvalidEntry(raw.to_string()))?;

        let slot_part = slot_part.trim();
        let slot = match slot_part.parse::<usize>() {
            Ok(number) => SlotId::from_number(number)?,
            Err(_) => slot_part.parse()?,
        };

        let (color_part, count_part) = match rest.split_once(':') {
            Some((color, count)) => (color, Some(count)),
            None => (rest, None),
        };
        let color: Color = color_part.parse()?;
        let count = count_part
            .map(|c| {
                c.trim()
                    .parse::<u32>()
                    .map_err(|_| SlotCountError::InvalidEntry(raw.to_string()))
            })
            .transpose()?;

        Ok(Self { slot, color, count })
    }
}

/// Collect entries into the maps taken by `PullTracker::confirm_data_pull`.
/// A later entry for the same slot replaces an earlier one.
pub fn collect_entries(
    entries: &[DataEntry],
) -> (BTreeMap<SlotId, Option<Color>>, BTreeMap<SlotId, u32>) {
    let mut colors = BTreeMap::new();
    let mut counts = BTreeMap::new();
    for entry in entries {
        colors.insert(entry.slot, Some(entry.color));
        match entry.count {
            Some(count) => {
                counts.insert(entry.slot, count);
            }
            None => {
                counts.remove(&entry.slot);
            }
        }
    }
    (colors, counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(
            DataEntry::parse("Slot2=Gold:0").unwrap(),
            DataEntry { slot: SlotId::Slot2, color: Color::Gold, count: Some(0) }
        );
        assert_eq!(
            DataEntry::parse("4=purple").unwrap(),
            DataEntry { slot: SlotId::Slot4, color: Color::Purple, count: None }
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(DataEntry::parse("Slot2"), Err(SlotCountError::InvalidEntry(_))));
        assert!(matches!(DataEntry::parse("7=Gold"), Err(SlotCountError::InvalidSlot(_))));
        assert!(matches!(DataEntry::parse("Slot1=Blue"), Err(SlotCountError::InvalidColor(_))));
        assert!(matches!(DataEntry::parse("Slot1=White:-3"), Err(SlotCountError::InvalidEntry(_))));
    }

    #[test]
    fn test_collect_last_entry_wins() {
        let entries = [
            DataEntry::parse("1=White:4").unwrap(),
            DataEntry::parse("3=Gold:0").unwrap(),
            DataEntry::parse("1=Purple").unwrap(),
        ];
        let (colors, counts) = collect_entries(&entries);

        assert_eq!(colors[&SlotId::Slot1], Some(Color::Purple));
        assert_eq!(colors.len(), 2);
        assert!(!counts.contains_key(&SlotId::Slot1));
        assert_eq!(counts[&SlotId::Slot3], 0);
    }
}
