//! Due-queue selection

use chrono::{DateTime, Duration, Utc};

use crate::vocab::{CategoryFilter, VocabularyItem};

/// Slack added to `as_of` so items scheduled for "now" are not lost to
/// clock granularity
pub const DEFAULT_DUE_BUFFER_SECS: i64 = 1;

/// Items due at `as_of` in the given category, most overdue first
pub fn due_items(
    items: &[VocabularyItem],
    category: &CategoryFilter,
    as_of: DateTime<Utc>,
) -> Vec<VocabularyItem> {
    due_items_with_buffer(
        items,
        category,
        as_of,
        Duration::seconds(DEFAULT_DUE_BUFFER_SECS),
    )
}

/// Same as [`due_items`] with an explicit forward buffer
///
/// Items without a scheduled review sort first. Items sharing a review
/// time keep their input order. The result is an owned snapshot.
pub fn due_items_with_buffer(
    items: &[VocabularyItem],
    category: &CategoryFilter,
    as_of: DateTime<Utc>,
    buffer: Duration,
) -> Vec<VocabularyItem> {
    let cutoff = as_of
        .checked_add_signed(buffer)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    let mut due: Vec<VocabularyItem> = items
        .iter()
        .filter(|item| category.matches(item) && item.srs.is_due(cutoff))
        .cloned()
        .collect();

    // None < Some(_), so unscheduled items come first
    due.sort_by_key(|item| item.srs.next_review_at);

    log::debug!(
        "Due queue for {}: {} of {} items",
        category,
        due.len(),
        items.len()
    );

    due
}

/// Number of items due at `as_of` across all categories, without buffer
pub fn count_due(items: &[VocabularyItem], as_of: DateTime<Utc>) -> usize {
    items.iter().filter(|item| item.srs.is_due(as_of)).count()
}
