//! Time source and calendar-day arithmetic
//!
//! All timestamps are stored as UTC instants. Day boundaries ("today",
//! "start of day") are resolved through a [`Calendar`] carrying a fixed UTC
//! offset, so scheduling and streaks agree with the learner's wall clock
//! while staying deterministic in tests.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Offset, TimeZone, Utc};

/// Source of the current instant
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Resolves instants to calendar days in a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    /// Calendar whose days start at midnight UTC
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Calendar using the machine's current local offset
    pub fn local() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    /// Calendar with an explicit offset in minutes east of UTC.
    /// Returns `None` when the offset is out of range (more than a day).
    pub fn with_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
    }

    /// Calendar day an instant falls on
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// First instant of a calendar day
    pub fn start_of(&self, day: NaiveDate) -> DateTime<Utc> {
        let local_midnight = day.and_time(NaiveTime::MIN);
        let utc = local_midnight - Duration::seconds(self.offset.local_minus_utc() as i64);
        Utc.from_utc_datetime(&utc)
    }

    /// First instant of the day containing `instant`
    pub fn start_of_day(&self, instant: DateTime<Utc>) -> DateTime<Utc> {
        self.start_of(self.day_of(instant))
    }

    /// Whether two instants fall on the same calendar day
    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.day_of(a) == self.day_of(b)
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_utc_start_of_day() {
        let cal = Calendar::utc();
        let start = cal.start_of_day(at("2026-03-10T17:45:12Z"));
        assert_eq!(start, at("2026-03-10T00:00:00Z"));
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        // UTC+2: 23:30 UTC is already the next local day
        let cal = Calendar::with_offset_minutes(120).unwrap();
        let instant = at("2026-03-10T23:30:00Z");

        assert_eq!(cal.day_of(instant), NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
        assert_eq!(cal.start_of_day(instant), at("2026-03-10T22:00:00Z"));
    }

    #[test]
    fn test_negative_offset() {
        let cal = Calendar::with_offset_minutes(-300).unwrap();
        let instant = at("2026-03-10T03:00:00Z");

        assert_eq!(cal.day_of(instant), NaiveDate::from_ymd_opt(2026, 3, 9).unwrap());
        assert_eq!(cal.start_of_day(instant), at("2026-03-09T05:00:00Z"));
    }

    #[test]
    fn test_invalid_offset_rejected() {
        assert!(Calendar::with_offset_minutes(24 * 60).is_none());
        assert!(Calendar::with_offset_minutes(i32::MAX).is_none());
    }

    #[test]
    fn test_same_day() {
        let cal = Calendar::utc();
        assert!(cal.same_day(at("2026-03-10T00:00:00Z"), at("2026-03-10T23:59:59Z")));
        assert!(!cal.same_day(at("2026-03-10T23:59:59Z"), at("2026-03-11T00:00:00Z")));
    }

    #[test]
    fn test_fixed_clock() {
        let instant = at("2026-03-10T08:00:00Z");
        assert_eq!(FixedClock(instant).now(), instant);
    }
}
