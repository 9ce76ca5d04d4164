//! Streaks, review forecast and dashboard statistics

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::models::ActivityLog;
use crate::clock::Calendar;
use crate::review::queue::count_due;
use crate::vocab::VocabularyItem;

/// Mastery level from which an item counts as mastered
pub const MASTERED_LEVEL: u8 = 4;

/// Longest forecast window, in days
pub const MAX_FORECAST_DAYS: u32 = 366;

/// Distinct calendar days with at least one review
fn review_days(items: &[VocabularyItem], calendar: &Calendar) -> BTreeSet<NaiveDate> {
    items
        .iter()
        .filter_map(|item| item.srs.last_reviewed_at)
        .map(|reviewed| calendar.day_of(reviewed))
        .collect()
}

/// Consecutive review days ending today or yesterday
///
/// A day not yet studied does not break yesterday's streak.
pub fn compute_streak(items: &[VocabularyItem], as_of: DateTime<Utc>, calendar: &Calendar) -> u32 {
    let days = review_days(items, calendar);

    let mut check_date = calendar.day_of(as_of);
    if !days.contains(&check_date) {
        check_date = check_date - Duration::days(1);
    }

    let mut streak = 0;
    while days.contains(&check_date) {
        streak += 1;
        check_date = check_date - Duration::days(1);
    }

    streak
}

/// Longest run of consecutive review days ever recorded
pub fn longest_streak(items: &[VocabularyItem], calendar: &Calendar) -> u32 {
    let days = review_days(items, calendar);

    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        current = match previous {
            Some(prev) if day - prev == Duration::days(1) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }

    longest
}

/// Number of reviews scheduled on each of the next `days_ahead` days,
/// today included. Days without reviews map to zero. The window is capped
/// at [`MAX_FORECAST_DAYS`].
pub fn compute_forecast(
    items: &[VocabularyItem],
    as_of: DateTime<Utc>,
    days_ahead: u32,
    calendar: &Calendar,
) -> BTreeMap<NaiveDate, usize> {
    let today = calendar.day_of(as_of);
    let mut forecast: BTreeMap<NaiveDate, usize> = (0..days_ahead.min(MAX_FORECAST_DAYS))
        .map_while(|offset| today.checked_add_signed(Duration::days(i64::from(offset))))
        .map(|date| (date, 0))
        .collect();

    for next in items.iter().filter_map(|item| item.srs.next_review_at) {
        if let Some(count) = forecast.get_mut(&calendar.day_of(next)) {
            *count += 1;
        }
    }

    forecast
}

/// Total events per day across all activity kinds
pub fn heatmap(log: &ActivityLog) -> BTreeMap<NaiveDate, u32> {
    let mut map = BTreeMap::new();
    for record in log.records() {
        *map.entry(record.date).or_insert(0) += record.count;
    }
    map
}

/// Items grouped by learning stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryBreakdown {
    /// Mastery level 0
    pub new: usize,
    /// Mastery levels 1 to 3
    pub learning: usize,
    /// Mastery level 4 and above
    pub mastered: usize,
}

impl MasteryBreakdown {
    pub fn from_items(items: &[VocabularyItem]) -> Self {
        let mut breakdown = Self::default();
        for item in items {
            match item.srs.mastery_level {
                0 => breakdown.new += 1,
                level if level >= MASTERED_LEVEL => breakdown.mastered += 1,
                _ => breakdown.learning += 1,
            }
        }
        breakdown
    }

    pub fn total(&self) -> usize {
        self.new + self.learning + self.mastered
    }

    /// Share of mastered items, 0.0 - 100.0
    pub fn mastered_percent(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.mastered as f64 / total as f64 * 100.0,
        }
    }
}

/// Dashboard overview of the vocabulary bank
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySummary {
    pub total_words: usize,
    pub due_now: usize,
    pub learned_today: usize,
    pub reviewed_today: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub mastery: MasteryBreakdown,
    pub mastered_percent: f64,
}

impl StudySummary {
    pub fn compute(items: &[VocabularyItem], as_of: DateTime<Utc>, calendar: &Calendar) -> Self {
        let mastery = MasteryBreakdown::from_items(items);

        Self {
            total_words: items.len(),
            due_now: count_due(items, as_of),
            learned_today: items
                .iter()
                .filter(|item| calendar.same_day(item.created_at, as_of))
                .count(),
            reviewed_today: items
                .iter()
                .filter_map(|item| item.srs.last_reviewed_at)
                .filter(|reviewed| calendar.same_day(*reviewed, as_of))
                .count(),
            current_streak: compute_streak(items, as_of, calendar),
            longest_streak: longest_streak(items, calendar),
            mastery,
            mastered_percent: mastery.mastered_percent(),
        }
    }
}
