//! Study activity data models

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Calendar;

/// Kind of study event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    /// One answered quiz question
    Quiz,
    /// One graded practice card
    Flashcard,
}

impl ActivityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Quiz => "Quiz",
            ActivityKind::Flashcard => "Flashcard",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of events of one kind on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Calendar day (YYYY-MM-DD)
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub count: u32,
}

/// Activity records keyed by `(day, kind)`
///
/// Holds at most one record per key; repeated events bump the count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    counts: BTreeMap<(NaiveDate, ActivityKind), u32>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from stored records, summing any duplicate keys
    pub fn from_records(records: impl IntoIterator<Item = ActivityRecord>) -> Self {
        let mut log = Self::new();
        for record in records {
            if record.count == 0 {
                continue;
            }
            *log.counts.entry((record.date, record.kind)).or_insert(0) += record.count;
        }
        log
    }

    /// Log one event at `as_of` and return the record as it now stands
    pub fn record_event(
        &mut self,
        kind: ActivityKind,
        as_of: DateTime<Utc>,
        calendar: &Calendar,
    ) -> ActivityRecord {
        let date = calendar.day_of(as_of);
        let count = self.counts.entry((date, kind)).or_insert(0);
        *count += 1;

        ActivityRecord {
            date,
            kind,
            count: *count,
        }
    }

    /// Replace the record for its key
    pub fn upsert(&mut self, record: ActivityRecord) {
        if record.count == 0 {
            self.counts.remove(&(record.date, record.kind));
        } else {
            self.counts.insert((record.date, record.kind), record.count);
        }
    }

    pub fn get(&self, date: NaiveDate, kind: ActivityKind) -> Option<ActivityRecord> {
        self.counts.get(&(date, kind)).map(|&count| ActivityRecord { date, kind, count })
    }

    /// Events of every kind on a day
    pub fn total_on(&self, date: NaiveDate) -> u32 {
        self.counts
            .range((date, ActivityKind::Quiz)..=(date, ActivityKind::Flashcard))
            .map(|(_, count)| *count)
            .sum()
    }

    /// All records ordered by day, then kind
    pub fn records(&self) -> Vec<ActivityRecord> {
        self.counts
            .iter()
            .map(|(&(date, kind), &count)| ActivityRecord { date, kind, count })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_event_creates_then_increments() {
        let cal = Calendar::utc();
        let mut log = ActivityLog::new();

        let first = log.record_event(ActivityKind::Quiz, at("2026-03-10T08:00:00Z"), &cal);
        assert_eq!(first.count, 1);
        assert_eq!(first.date, day(2026, 3, 10));

        let second = log.record_event(ActivityKind::Quiz, at("2026-03-10T22:15:00Z"), &cal);
        assert_eq!(second.count, 2);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_kinds_and_days_are_separate_keys() {
        let cal = Calendar::utc();
        let mut log = ActivityLog::new();

        log.record_event(ActivityKind::Quiz, at("2026-03-10T08:00:00Z"), &cal);
        log.record_event(ActivityKind::Flashcard, at("2026-03-10T09:00:00Z"), &cal);
        log.record_event(ActivityKind::Flashcard, at("2026-03-11T09:00:00Z"), &cal);

        assert_eq!(log.len(), 3);
        assert_eq!(log.total_on(day(2026, 3, 10)), 2);
        assert_eq!(log.get(day(2026, 3, 11), ActivityKind::Quiz), None);
    }

    #[test]
    fn test_from_records_merges_duplicates() {
        let records = vec![
            ActivityRecord { date: day(2026, 3, 10), kind: ActivityKind::Quiz, count: 2 },
            ActivityRecord { date: day(2026, 3, 10), kind: ActivityKind::Quiz, count: 3 },
            ActivityRecord { date: day(2026, 3, 9), kind: ActivityKind::Flashcard, count: 1 },
        ];

        let log = ActivityLog::from_records(records);
        assert_eq!(log.len(), 2);
        assert_eq!(log.get(day(2026, 3, 10), ActivityKind::Quiz).unwrap().count, 5);
        // ordered by day
        assert_eq!(log.records()[0].date, day(2026, 3, 9));
    }

    #[test]
    fn test_record_uses_calendar_day() {
        let cal = Calendar::with_offset_minutes(-8 * 60).unwrap();
        let mut log = ActivityLog::new();

        let record = log.record_event(ActivityKind::Flashcard, at("2026-03-10T03:00:00Z"), &cal);
        assert_eq!(record.date, day(2026, 3, 9));
    }

    #[test]
    fn test_record_serializes_with_type_key() {
        let record = ActivityRecord { date: day(2026, 3, 10), kind: ActivityKind::Flashcard, count: 4 };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["type"], "Flashcard");
        assert_eq!(json["date"], "2026-03-10");
        assert_eq!(json["count"], 4);
    }
}
