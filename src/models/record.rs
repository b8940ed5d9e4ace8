//! Pull record data model
//!
//! A `PullRecord` is the immutable entry appended to the history for every
//! confirmed pull, serialized with the camelCase field names of the history
//! file.

use crate::models::slot::{Color, SlotId};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which confirmation path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputSource {
    /// Derived from the live slot selection
    #[default]
    Click,
    /// Colors and counts supplied directly by the caller
    Data,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Click => f.write_str("Click"),
            InputSource::Data => f.write_str("Data"),
        }
    }
}

/// One confirmed pull
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRecord {
    /// 1-based position in the lifetime sequence of confirmed pulls
    #[serde(alias = "PullNumber")]
    pub pull_number: u32,
    /// Local time of confirmation
    #[serde(alias = "Timestamp", with = "timestamp_serde")]
    pub timestamp: DateTime<Local>,
    /// Colors of the slots that were committed
    #[serde(alias = "SlotColors")]
    pub slot_colors: BTreeMap<SlotId, Color>,
    /// Streak counters after this pull, for the committed slots only
    #[serde(alias = "SlotCounters")]
    pub slot_counters: BTreeMap<SlotId, u32>,
    // Files from the desktop tracker predate this field
    #[serde(alias = "InputSource", default)]
    pub input_source: InputSource,
}

impl PullRecord {
    /// Create a record stamped with the current local time
    pub fn new(
        pull_number: u32,
        slot_colors: BTreeMap<SlotId, Color>,
        slot_counters: BTreeMap<SlotId, u32>,
        input_source: InputSource,
    ) -> Self {
        Self {
            pull_number,
            timestamp: Local::now(),
            slot_colors,
            slot_counters,
            input_source,
        }
    }

    pub fn color(&self, slot: SlotId) -> Option<Color> {
        self.slot_colors.get(&slot).copied()
    }

    pub fn counter(&self, slot: SlotId) -> Option<u32> {
        self.slot_counters.get(&slot).copied()
    }

    /// Number of Gold results in this pull
    pub fn gold_count(&self) -> usize {
        self.slot_colors.values().filter(|c| c.resets_streak()).count()
    }

    /// Get a one-line human-readable summary of the pull
    pub fn summary(&self) -> String {
        let slots: Vec<String> = SlotId::ALL
            .iter()
            .map(|slot| match (self.color(*slot), self.counter(*slot)) {
                (Some(color), Some(count)) => format!("{}:{}({})", slot.number(), color, count),
                (Some(color), None) => format!("{}:{}", slot.number(), color),
                _ => format!("{}:-", slot.number()),
            })
            .collect();

        format!(
            "#{:<4} {} [{}] {}",
            self.pull_number,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.input_source,
            slots.join("  ")
        )
    }
}

/// RFC 3339 on write; also accepts offset-less local timestamps on read
mod timestamp_serde {
    use chrono::{DateTime, Duration, Local, NaiveDateTime, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Local>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub(super) fn parse(raw: &str) -> Option<DateTime<Local>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Local));
        }
        let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()?;
        Some(resolve_local(&Local, &naive))
    }

    /// Place a wall-clock time in `tz`. Times skipped by a daylight-saving
    /// jump are read one hour later so the record still loads.
    pub(super) fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> DateTime<Tz> {
        tz.from_local_datetime(naive)
            .earliest()
            .or_else(|| {
                naive
                    .checked_add_signed(Duration::hours(1))
                    .and_then(|shifted| tz.from_local_datetime(&shifted).earliest())
            })
            .unwrap_or_else(|| tz.from_utc_datetime(naive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{
        Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike,
    };

    /// UTC-5 until 2025-03-09 07:00 UTC, UTC-4 afterwards, so local
    /// 02:00..03:00 on that day never happens.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap().and_hms_opt(7, 0, 0).unwrap()
        }

        fn standard() -> FixedOffset {
            FixedOffset::west_opt(5 * 3600).unwrap()
        }

        fn daylight() -> FixedOffset {
            FixedOffset::west_opt(4 * 3600).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_offset: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let as_standard = *local + Duration::hours(5) < Self::switch();
            let as_daylight = *local + Duration::hours(4) >= Self::switch();
            match (as_standard, as_daylight) {
                (true, false) => LocalResult::Single(Self::standard()),
                (false, true) => LocalResult::Single(Self::daylight()),
                (true, true) => LocalResult::Ambiguous(Self::standard(), Self::daylight()),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if *utc < Self::switch() {
                Self::standard()
            } else {
                Self::daylight()
            }
        }
    }

    fn naive(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn create_test_record() -> PullRecord {
        let mut colors = BTreeMap::new();
        colors.insert(SlotId::Slot1, Color::White);
        colors.insert(SlotId::Slot2, Color::Gold);
        let mut counters = BTreeMap::new();
        counters.insert(SlotId::Slot1, 4);
        counters.insert(SlotId::Slot2, 0);
        PullRecord::new(3, colors, counters, InputSource::Data)
    }

    #[test]
    fn test_serialized_field_names() {
        let record = create_test_record();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["pullNumber"], 3);
        assert_eq!(value["slotColors"]["Slot1"], "White");
        assert_eq!(value["slotColors"]["Slot2"], "Gold");
        assert_eq!(value["slotCounters"]["Slot1"], 4);
        assert_eq!(value["inputSource"], "Data");
        assert!(value["timestamp"].is_string());
        assert!(value.get("slotColors").unwrap().get("Slot3").is_none());
    }

    #[test]
    fn test_serde_preserves_record() {
        let record = create_test_record();
        let json = serde_json::to_string_pretty(&record).unwrap();
        let restored: PullRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }

    #[test]
    fn test_legacy_pascal_case_record() {
        let json = r#"{
            "PullNumber": 1,
            "Timestamp": "2025-03-14T21:05:09.1234567",
            "SlotColors": { "Slot1": "Purple", "Slot2": "White", "Slot3": "Gold", "Slot4": "White", "Slot5": "White" },
            "SlotCounters": { "Slot1": 1, "Slot2": 1, "Slot3": 0, "Slot4": 1, "Slot5": 1 }
        }"#;
        let record: PullRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.pull_number, 1);
        assert_eq!(record.input_source, InputSource::Click);
        assert_eq!(record.color(SlotId::Slot3), Some(Color::Gold));
        assert_eq!(record.counter(SlotId::Slot1), Some(1));
        assert_eq!(record.timestamp.year(), 2025);
        assert_eq!(record.timestamp.hour(), 21);
        assert_eq!(record.gold_count(), 1);
    }

    #[test]
    fn test_timestamp_with_offset() {
        let parsed = timestamp_serde::parse("2025-03-14T21:05:09+09:00").unwrap();
        let expected = DateTime::parse_from_rfc3339("2025-03-14T12:05:09Z").unwrap();
        assert_eq!(parsed, expected);
        assert!(timestamp_serde::parse("yesterday").is_none());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let json = r#"{"pullNumber":1,"timestamp":"2025-03-14T21:05:09Z",
            "slotColors":{"Slot1":"Red"},"slotCounters":{},"inputSource":"Click"}"#;
        assert!(serde_json::from_str::<PullRecord>(json).is_err());
    }

    #[test]
    fn test_summary() {
        let record = create_test_record();
        let summary = record.summary();
        assert!(summary.starts_with("#3"));
        assert!(summary.contains("[Data]"));
        assert!(summary.contains("1:White(4)"));
        assert!(summary.contains("2:Gold(0)"));
        assert!(summary.contains("3:-"));
    }

    #[test]
    fn test_resolve_local_keeps_ordinary_times() {
        let resolved = timestamp_serde::resolve_local(&SpringForward, &naive("2025-03-09T01:30:00"));
        assert_eq!(resolved.naive_local(), naive("2025-03-09T01:30:00"));
        assert_eq!(resolved.naive_utc(), naive("2025-03-09T06:30:00"));
    }

    #[test]
    fn test_resolve_local_skipped_hour() {
        assert!(SpringForward
            .from_local_datetime(&naive("2025-03-09T02:30:00"))
            .earliest()
            .is_none());

        let resolved = timestamp_serde::resolve_local(&SpringForward, &naive("2025-03-09T02:30:00"));
        assert_eq!(resolved.naive_local(), naive("2025-03-09T03:30:00"));
        assert_eq!(resolved.hour(), 3);
        assert_eq!(resolved.minute(), 30);
    }
}
