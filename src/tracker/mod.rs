//! Pull tracker
//!
//! Owns the live slot selection, the per-slot streak counters, the session
//! counters and the persisted pull history. Every history change is written
//! through to disk immediately; a failed write is reported to the caller and
//! logged but never rolls back the in-memory change.

pub mod entry;
pub mod slots;

use crate::config::{HistoryStorage, TrackerConfig};
use crate::models::{Color, InputSource, PullRecord, SessionStats, SlotId};
use crate::{Result, SlotCountError, SLOT_COUNT};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::path::Path;

pub use entry::{collect_entries, DataEntry};
pub use slots::SlotBoard;

/// Outcome of the history write that follows a committed change
#[derive(Debug)]
pub enum SaveStatus {
    Saved,
    Failed(SlotCountError),
}

impl SaveStatus {
    pub fn is_saved(&self) -> bool {
        matches!(self, SaveStatus::Saved)
    }

    pub fn error(&self) -> Option<&SlotCountError> {
        match self {
            SaveStatus::Saved => None,
            SaveStatus::Failed(err) => Some(err),
        }
    }
}

/// Returned for every committed pull
#[derive(Debug)]
pub struct PullReceipt {
    pub pull_number: u32,
    pub save: SaveStatus,
}

/// Single owner of all tracker state
#[derive(Debug)]
pub struct PullTracker {
    board: SlotBoard,
    stats: SessionStats,
    history: Vec<PullRecord>,
    storage: HistoryStorage,
    data_pull_updates_counters: bool,
}

impl PullTracker {
    /// Build a tracker from configuration and load its history
    pub fn new(config: &TrackerConfig) -> Self {
        let mut tracker = Self::with_storage(config.history_storage());
        tracker.data_pull_updates_counters = config.data_pull_updates_counters;
        if config.restore_counters_from_history {
            tracker.restore_counters();
        }
        tracker
    }

    /// Build a tracker with default behavior around the given storage
    pub fn with_storage(storage: HistoryStorage) -> Self {
        let mut tracker = Self {
            board: SlotBoard::new(),
            stats: SessionStats::default(),
            history: Vec::new(),
            storage,
            data_pull_updates_counters: false,
        };
        tracker.initialize_slots();
        tracker.load_history();
        tracker
    }

    fn load_history(&mut self) {
        match self.storage.load_history() {
            Ok(records) => {
                let total = records.len() as u32;
                if let Some(last) = records.iter().map(|r| r.pull_number).max() {
                    if last != total {
                        warn!(
                            "History holds {} records but the highest pull number is {}",
                            total, last
                        );
                    }
                }
                info!(
                    "Loaded {} pulls from {}",
                    total,
                    self.storage.get_history_path().display()
                );
                self.history = records;
                self.stats = SessionStats::with_total(total);
            }
            Err(e) => {
                warn!("Error loading pull history, starting empty: {}", e);
                self.history.clear();
                self.stats = SessionStats::default();
            }
        }
    }

    /// Seed each live counter from the newest record that has one for the slot
    fn restore_counters(&mut self) {
        for (slot, count) in self.latest_recorded_counters() {
            self.board.set_counter(slot, count);
        }
        debug!("Restored streak counters {:?}", self.board.counters());
    }

    fn persist(&self) -> SaveStatus {
        match self.storage.save_history(&self.history) {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                warn!("Error saving pull history: {}", e);
                SaveStatus::Failed(e)
            }
        }
    }

    fn append(&mut self, record: PullRecord) -> PullReceipt {
        let pull_number = record.pull_number;
        debug!("Recording pull: {}", record.summary());
        self.history.push(record);
        PullReceipt {
            pull_number,
            save: self.persist(),
        }
    }

    /// Reset selections to empty and counters to zero
    pub fn initialize_slots(&mut self) {
        self.board.initialize();
    }

    /// Record the color for a slot in the unconfirmed selection
    pub fn select_color(&mut self, slot: SlotId, color: Color) {
        self.board.select(slot, color);
    }

    /// Select by name, rejecting unknown slots or colors without any change
    pub fn select_color_named(&mut self, slot: &str, color: &str) -> Result<()> {
        let slot: SlotId = slot.parse()?;
        let color: Color = color.parse()?;
        self.select_color(slot, color);
        Ok(())
    }

    pub fn are_all_slots_selected(&self) -> bool {
        self.board.all_selected()
    }

    /// Commit the current selection as a `Click` pull
    pub fn confirm_pull(&mut self) -> Result<PullReceipt> {
        self.confirm_pull_as(InputSource::Click)
    }

    /// Commit the current selection, tagging the record with `source`
    pub fn confirm_pull_as(&mut self, source: InputSource) -> Result<PullReceipt> {
        if !self.board.all_selected() {
            return Err(SlotCountError::IncompleteSelection(self.board.missing()));
        }

        let slot_colors = self.board.selected_colors();
        let slot_counters = self.board.apply_selected();
        let pull_number = self.stats.record_pull();

        let record = PullRecord::new(pull_number, slot_colors, slot_counters, source);
        let receipt = self.append(record);

        self.board.clear_selections();
        Ok(receipt)
    }

    /// Commit externally supplied colors and counts.
    ///
    /// Only slots with a color are recorded; a recorded slot missing from
    /// `counts` has no counter entry. Live counters are left alone unless
    /// the tracker was configured with `data_pull_updates_counters`, and the
    /// live selection is never touched.
    pub fn confirm_data_pull(
        &mut self,
        colors: &BTreeMap<SlotId, Option<Color>>,
        counts: &BTreeMap<SlotId, u32>,
    ) -> PullReceipt {
        let slot_colors: BTreeMap<SlotId, Color> = colors
            .iter()
            .filter_map(|(slot, color)| color.map(|c| (*slot, c)))
            .collect();
        let slot_counters: BTreeMap<SlotId, u32> = counts
            .iter()
            .filter(|(slot, _)| slot_colors.contains_key(slot))
            .map(|(slot, count)| (*slot, *count))
            .collect();

        if self.data_pull_updates_counters {
            for (slot, count) in &slot_counters {
                self.board.set_counter(*slot, *count);
            }
        }

        let pull_number = self.stats.record_pull();
        let record = PullRecord::new(pull_number, slot_colors, slot_counters, InputSource::Data);
        self.append(record)
    }

    pub fn clear_selections(&mut self) {
        self.board.clear_selections();
    }

    /// Discard the unconfirmed selection
    pub fn back_click(&mut self) {
        self.clear_selections();
    }

    /// Close the current session. Returns whether it counted toward the average.
    pub fn reset_session(&mut self) -> bool {
        let counted = self.stats.end_session();
        self.clear_selections();
        info!(
            "Session reset (counted: {}, sessions: {})",
            counted, self.stats.session_count
        );
        counted
    }

    /// Erase everything, including the history file contents
    pub fn reset_all(&mut self) -> SaveStatus {
        self.stats.reset();
        self.history.clear();
        self.initialize_slots();
        info!("All pull data reset");
        self.persist()
    }

    pub fn slot_selection(&self, slot: SlotId) -> Option<Color> {
        self.board.selection(slot)
    }

    pub fn slot_counter(&self, slot: SlotId) -> u32 {
        self.board.counter(slot)
    }

    pub fn selection_snapshot(&self) -> [Option<Color>; SLOT_COUNT] {
        self.board.selections()
    }

    pub fn counter_snapshot(&self) -> [u32; SLOT_COUNT] {
        self.board.counters()
    }

    pub fn total_pulls(&self) -> u32 {
        self.stats.total_pulls
    }

    pub fn session_pulls(&self) -> u32 {
        self.stats.session_pulls
    }

    pub fn session_count(&self) -> u32 {
        self.stats.session_count
    }

    pub fn average_pulls(&self) -> f64 {
        self.stats.average_pulls()
    }

    pub fn session_stats(&self) -> SessionStats {
        self.stats
    }

    /// Copy of the history, newest pull first
    pub fn pull_history(&self) -> Vec<PullRecord> {
        let mut records = self.history.clone();
        records.sort_by(|a, b| b.pull_number.cmp(&a.pull_number));
        records
    }

    /// Counter stored by the newest record carrying one, per slot
    pub fn latest_recorded_counters(&self) -> BTreeMap<SlotId, u32> {
        let mut latest: BTreeMap<SlotId, (u32, u32)> = BTreeMap::new();
        for record in &self.history {
            for (slot, count) in &record.slot_counters {
                let newer = latest
                    .get(slot)
                    .map_or(true, |(number, _)| record.pull_number > *number);
                if newer {
                    latest.insert(*slot, (record.pull_number, *count));
                }
            }
        }
        latest
            .into_iter()
            .map(|(slot, (_, count))| (slot, count))
            .collect()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_path(&self) -> &Path {
        self.storage.get_history_path()
    }
}
