//! Live slot state: the unconfirmed selection buffer and streak counters

use crate::models::{Color, SlotId};
use crate::SLOT_COUNT;
use std::collections::BTreeMap;

/// Selection and counter for every slot, indexed by `SlotId::index`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBoard {
    selections: [Option<Color>; SLOT_COUNT],
    counters: [u32; SLOT_COUNT],
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// All slots unselected, all counters zero
    pub fn initialize(&mut self) {
        *self = Self::default();
    }

    pub fn select(&mut self, slot: SlotId, color: Color) {
        self.selections[slot.index()] = Some(color);
    }

    pub fn selection(&self, slot: SlotId) -> Option<Color> {
        self.selections[slot.index()]
    }

    pub fn counter(&self, slot: SlotId) -> u32 {
        self.counters[slot.index()]
    }

    pub fn set_counter(&mut self, slot: SlotId, value: u32) {
        self.counters[slot.index()] = value;
    }

    pub fn clear_selections(&mut self) {
        self.selections = [None; SLOT_COUNT];
    }

    pub fn all_selected(&self) -> bool {
        self.selections.iter().all(Option::is_some)
    }

    /// Slots still waiting for a color, in order
    pub fn missing(&self) -> Vec<SlotId> {
        SlotId::ALL
            .iter()
            .copied()
            .filter(|slot| self.selection(*slot).is_none())
            .collect()
    }

    /// Currently selected colors, skipping empty slots
    pub fn selected_colors(&self) -> BTreeMap<SlotId, Color> {
        SlotId::ALL
            .iter()
            .filter_map(|slot| self.selection(*slot).map(|color| (*slot, color)))
            .collect()
    }

    /// Apply the streak rule for every selected slot and return the
    /// updated counters of those slots
    pub fn apply_selected(&mut self) -> BTreeMap<SlotId, u32> {
        let mut applied = BTreeMap::new();
        for slot in SlotId::ALL {
            if let Some(color) = self.selection(slot) {
                let next = color.next_counter(self.counter(slot));
                self.set_counter(slot, next);
                applied.insert(slot, next);
            }
        }
        applied
    }

    pub fn selections(&self) -> [Option<Color>; SLOT_COUNT] {
        self.selections
    }

    pub fn counters(&self) -> [u32; SLOT_COUNT] {
        self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = SlotBoard::new();
        assert!(!board.all_selected());
        assert_eq!(board.missing(), SlotId::ALL.to_vec());
        assert_eq!(board.counters(), [0; SLOT_COUNT]);
    }

    #[test]
    fn test_apply_selected_only_touches_selected_slots() {
        let mut board = SlotBoard::new();
        board.set_counter(SlotId::Slot2, 9);
        board.set_counter(SlotId::Slot4, 3);
        board.select(SlotId::Slot1, Color::White);
        board.select(SlotId::Slot2, Color::Gold);

        let applied = board.apply_selected();

        assert_eq!(applied.len(), 2);
        assert_eq!(applied[&SlotId::Slot1], 1);
        assert_eq!(applied[&SlotId::Slot2], 0);
        assert_eq!(board.counter(SlotId::Slot4), 3);
    }

    #[test]
    fn test_clear_keeps_counters() {
        let mut board = SlotBoard::new();
        board.select(SlotId::Slot3, Color::Purple);
        board.apply_selected();
        board.clear_selections();

        assert_eq!(board.selection(SlotId::Slot3), None);
        assert_eq!(board.counter(SlotId::Slot3), 1);

        board.initialize();
        assert_eq!(board.counter(SlotId::Slot3), 0);
    }
}
