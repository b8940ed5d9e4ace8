//! Data models module
//!
//! Contains slot and color enumerations, the persisted pull record,
//! and the in-memory session counters.

pub mod record;
pub mod slot;
pub mod stats;

// Re-export commonly used types
pub use record::{InputSource, PullRecord};
pub use slot::{Color, SlotId};
pub use stats::SessionStats;
