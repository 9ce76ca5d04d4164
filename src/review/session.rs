//! Practice sessions over a due-queue snapshot

use chrono::{DateTime, Utc};

use super::algorithm::apply_review;
use super::queue::due_items;
use crate::activity::{ActivityKind, ActivityLog};
use crate::clock::Calendar;
use crate::vocab::{CategoryFilter, VocabularyItem};

/// A run through the items due for review
///
/// The session owns its queue, so edits made to the store while it runs are
/// not observed. Each graded card is returned to the caller for persisting.
#[derive(Debug, Clone)]
pub struct PracticeSession {
    queue: Vec<VocabularyItem>,
    position: usize,
    showing_answer: bool,
    calendar: Calendar,
}

impl PracticeSession {
    /// Start a session over the items due at `as_of`
    pub fn start(
        items: &[VocabularyItem],
        category: &CategoryFilter,
        as_of: DateTime<Utc>,
        calendar: Calendar,
    ) -> Self {
        let queue = due_items(items, category, as_of);
        log::info!("Practice session started with {} due items", queue.len());
        Self::from_queue(queue, calendar)
    }

    /// Start a session over a prepared queue
    pub fn from_queue(queue: Vec<VocabularyItem>, calendar: Calendar) -> Self {
        Self {
            queue,
            position: 0,
            showing_answer: false,
            calendar,
        }
    }

    /// The card being practised, `None` once the session is complete
    pub fn current(&self) -> Option<&VocabularyItem> {
        self.queue.get(self.position)
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.queue.len()
    }

    pub fn is_showing_answer(&self) -> bool {
        self.showing_answer
    }

    /// Total cards in the session
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Cards not yet graded
    pub fn remaining(&self) -> usize {
        self.queue.len().saturating_sub(self.position)
    }

    /// Flip the current card
    pub fn reveal(&mut self) {
        if !self.is_complete() {
            self.showing_answer = true;
        }
    }

    /// Grade the current card and move on
    ///
    /// Returns the card with its new review state, or `None` when the
    /// session is already complete. A `Flashcard` event is logged.
    pub fn submit(
        &mut self,
        quality: u8,
        now: DateTime<Utc>,
        activity: &mut ActivityLog,
    ) -> Option<VocabularyItem> {
        let item = self.queue.get_mut(self.position)?;
        item.srs = apply_review(&item.srs, quality, now, &self.calendar);
        let updated = item.clone();

        activity.record_event(ActivityKind::Flashcard, now, &self.calendar);

        self.position += 1;
        self.showing_answer = false;

        log::debug!(
            "Graded '{}' with quality {}, next review {:?}",
            updated.word,
            quality,
            updated.srs.next_review_at
        );

        Some(updated)
    }
}
