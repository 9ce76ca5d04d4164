//! SM-2 Spaced Repetition Algorithm
//!
//! Variant of the SuperMemo 2 algorithm used to schedule vocabulary reviews.
//!
//! Quality ratings (0-5):
//! - 0: Complete blackout, no recall
//! - 1: Incorrect, but upon seeing answer, remembered
//! - 2: Incorrect, but answer seemed easy to recall
//! - 3: Correct response with serious difficulty
//! - 4: Correct response after hesitation
//! - 5: Perfect response with no hesitation
//!
//! The ease factor is adjusted after every review, failed ones included.

use chrono::{DateTime, Duration, Utc};

use crate::clock::Calendar;
use crate::vocab::SrsState;

/// Minimum ease factor allowed
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Highest mastery level an item can reach
pub const MAX_MASTERY_LEVEL: u8 = 5;

/// Highest quality rating
pub const MAX_QUALITY: u8 = 5;

/// Lowest quality counted as a successful recall
pub const PASSING_QUALITY: u8 = 3;

/// Longest interval the scheduler will produce (about 100 years)
pub const MAX_INTERVAL_DAYS: f64 = 36_500.0;

/// Grades offered on the practice screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    /// Did not remember; restarts the schedule
    Forgot,
    /// Remembered with difficulty
    Hard,
    /// Remembered without effort
    Easy,
}

impl Rating {
    pub const ALL: [Rating; 3] = [Rating::Forgot, Rating::Hard, Rating::Easy];

    /// SM-2 quality for this grade
    pub fn quality(self) -> u8 {
        match self {
            Rating::Forgot => 0,
            Rating::Hard => 3,
            Rating::Easy => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rating::Forgot => "Forgot",
            Rating::Hard => "Hard",
            Rating::Easy => "Easy",
        }
    }
}

/// Compute the spaced repetition state after one review
///
/// Qualities above 5 are clamped to 5. State that has drifted outside its
/// invariants (ease below the floor, mastery above the cap) is clamped before
/// use, so the result always satisfies them.
pub fn apply_review(
    state: &SrsState,
    quality: u8,
    now: DateTime<Utc>,
    calendar: &Calendar,
) -> SrsState {
    let quality = if quality > MAX_QUALITY {
        log::warn!("Review quality {} out of range, clamping to {}", quality, MAX_QUALITY);
        MAX_QUALITY
    } else {
        quality
    };

    let ease_factor = state.ease_factor.max(MIN_EASE_FACTOR);
    let mastery_level = state.mastery_level.min(MAX_MASTERY_LEVEL);

    let mut next = state.clone();
    next.last_reviewed_at = Some(now);

    if quality < PASSING_QUALITY {
        // Incorrect response - restart the schedule
        next.repetitions = 0;
        next.interval = 1.0;
        next.mastery_level = mastery_level.saturating_sub(1);
    } else {
        next.interval = match state.repetitions {
            0 => 1.0,
            1 => 6.0,
            _ => (state.interval * ease_factor)
                .round()
                .max(1.0)
                .min(MAX_INTERVAL_DAYS),
        };
        next.repetitions = state.repetitions.saturating_add(1);
        next.mastery_level = (mastery_level + 1).min(MAX_MASTERY_LEVEL);
    }

    // EF' = EF + (0.1 - (5-q) * (0.08 + (5-q) * 0.02))
    let missed = f64::from(MAX_QUALITY - quality);
    next.ease_factor = (ease_factor + (0.1 - missed * (0.08 + missed * 0.02))).max(MIN_EASE_FACTOR);

    let days = next.interval.floor() as i64;
    next.next_review_at = Some(
        calendar
            .start_of_day(now)
            .checked_add_signed(Duration::days(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    );

    next
}

/// Interval (days) each rating would produce, in [`Rating::ALL`] order.
/// Used to show users what each grade would do before they pick one.
pub fn preview_intervals(state: &SrsState, now: DateTime<Utc>, calendar: &Calendar) -> [f64; 3] {
    Rating::ALL.map(|rating| apply_review(state, rating.quality(), now, calendar).interval)
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-10T15:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn fresh() -> SrsState {
        SrsState::new(now())
    }

    fn review(state: &SrsState, quality: u8) -> SrsState {
        apply_review(state, quality, now(), &Calendar::utc())
    }

    #[test]
    fn test_first_review_perfect() {
        let next = review(&fresh(), 5);

        assert_eq!(next.repetitions, 1);
        assert_eq!(next.interval, 1.0);
        assert!((next.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(next.mastery_level, 1);
        assert_eq!(next.last_reviewed_at, Some(now()));
    }

    #[test]
    fn test_second_review_correct() {
        let mut state = fresh();
        state.repetitions = 1;
        state.interval = 1.0;

        let next = review(&state, 4);

        assert_eq!(next.interval, 6.0);
        assert_eq!(next.repetitions, 2);
    }

    #[test]
    fn test_subsequent_review_uses_previous_ease() {
        let mut state = fresh();
        state.repetitions = 5;
        state.interval = 10.0;
        state.ease_factor = 2.5;

        // 10 * 2.5 = 25, ease updated afterwards
        let next = review(&state, 5);
        assert_eq!(next.interval, 25.0);
        assert!((next.ease_factor - 2.6).abs() < 1e-9);

        state.interval = 7.0;
        state.ease_factor = 1.5;
        // 7 * 1.5 = 10.5 rounds half away from zero
        assert_eq!(review(&state, 3).interval, 11.0);
    }

    #[test]
    fn test_failure_resets() {
        let mut state = fresh();
        state.repetitions = 4;
        state.interval = 30.0;
        state.mastery_level = 3;

        let next = review(&state, 1);

        assert_eq!(next.repetitions, 0);
        assert_eq!(next.interval, 1.0);
        assert_eq!(next.mastery_level, 2);
    }

    #[test]
    fn test_failure_at_zero_mastery_stays_zero() {
        let next = review(&fresh(), 0);
        assert_eq!(next.mastery_level, 0);
    }

    #[test]
    fn test_failure_still_updates_ease() {
        // The ease formula runs for failed reviews too: q=2 moves it by -0.32
        let next = review(&fresh(), 2);
        assert!((next.ease_factor - 2.18).abs() < 1e-9);

        // q=4 leaves it unchanged
        let mut state = fresh();
        state.repetitions = 2;
        assert!((review(&state, 4).ease_factor - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_next_review_at_start_of_day_plus_interval() {
        let mut state = fresh();
        state.repetitions = 1;

        let next = review(&state, 5);
        let expected = DateTime::parse_from_rfc3339("2026-03-16T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(next.next_review_at, Some(expected));
    }

    #[test]
    fn test_next_review_follows_calendar_offset() {
        // 15:30 UTC is 00:30 on March 11 at UTC+9
        let calendar = Calendar::with_offset_minutes(9 * 60).unwrap();
        let next = apply_review(&fresh(), 5, now(), &calendar);

        let expected = DateTime::parse_from_rfc3339("2026-03-11T15:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(next.next_review_at, Some(expected));
    }

    #[test]
    fn test_long_run_of_easy_reviews_stays_in_range() {
        let mut state = fresh();
        for _ in 0..40 {
            state = review(&state, Rating::Easy.quality());
            assert!(state.interval <= MAX_INTERVAL_DAYS);
            assert!(state.next_review_at.is_some());
        }
        assert_eq!(state.interval, MAX_INTERVAL_DAYS);
        assert_eq!(state.mastery_level, MAX_MASTERY_LEVEL);
    }

    #[test]
    fn test_huge_stored_interval_is_capped() {
        let mut state = fresh();
        state.repetitions = 9;
        state.interval = 1e12;
        state.ease_factor = 4.0;

        let next = review(&state, 4);
        assert_eq!(next.interval, MAX_INTERVAL_DAYS);

        let expected = Calendar::utc().start_of_day(now()) + Duration::days(MAX_INTERVAL_DAYS as i64);
        assert_eq!(next.next_review_at, Some(expected));

        let previews = preview_intervals(&state, now(), &Calendar::utc());
        assert_eq!(previews, [1.0, MAX_INTERVAL_DAYS, MAX_INTERVAL_DAYS]);
    }

    #[test]
    fn test_quality_above_range_is_clamped() {
        assert_eq!(review(&fresh(), 9), review(&fresh(), 5));
    }

    #[test]
    fn test_same_input_same_output() {
        let mut state = fresh();
        state.repetitions = 3;
        state.interval = 6.0;
        assert_eq!(review(&state, 4), review(&state, 4));
    }

    #[test]
    fn test_invariants_hold_over_any_sequence() {
        let mut state = fresh();
        // Deterministic walk over every quality in a scrambled order
        for step in 0..500u32 {
            let quality = ((step * 7 + step / 3) % 6) as u8;
            let before = state.clone();
            state = review(&state, quality);

            assert!(state.ease_factor >= MIN_EASE_FACTOR);
            assert!(state.mastery_level <= MAX_MASTERY_LEVEL);
            assert!(state.interval >= 1.0);
            if quality < PASSING_QUALITY {
                assert_eq!(state.repetitions, 0);
                assert_eq!(state.mastery_level, before.mastery_level.saturating_sub(1));
            } else {
                assert_eq!(state.repetitions, before.repetitions + 1);
            }
        }
    }

    #[test]
    fn test_ease_factor_minimum() {
        let mut state = fresh();
        for _ in 0..20 {
            state = review(&state, 0);
        }
        assert_eq!(state.ease_factor, MIN_EASE_FACTOR);
    }

    #[test]
    fn test_drifted_state_is_clamped() {
        let mut state = fresh();
        state.ease_factor = 0.5;
        state.mastery_level = 9;
        state.repetitions = 3;
        state.interval = 4.0;

        let next = review(&state, 5);
        assert_eq!(next.mastery_level, MAX_MASTERY_LEVEL);
        assert!(next.ease_factor >= MIN_EASE_FACTOR);
        // 4 * 1.3 = 5.2
        assert_eq!(next.interval, 5.0);
    }

    #[test]
    fn test_rating_qualities() {
        assert_eq!(Rating::Forgot.quality(), 0);
        assert_eq!(Rating::Hard.quality(), 3);
        assert_eq!(Rating::Easy.quality(), 5);
    }

    #[test]
    fn test_preview_intervals() {
        let mut state = fresh();
        state.repetitions = 2;
        state.interval = 6.0;

        // Forgot resets, Hard and Easy both multiply by the current ease
        assert_eq!(preview_intervals(&state, now(), &Calendar::utc()), [1.0, 15.0, 15.0]);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
