//! Data models for the vocabulary bank

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category given to items created without one
pub const DEFAULT_CATEGORY: &str = "General";

/// Part of speech given to items created without one
pub const DEFAULT_PART_OF_SPEECH: &str = "Noun";

/// Filter keyword that matches every category
pub const ALL_CATEGORIES: &str = "All";

/// Spaced repetition state for a vocabulary item
///
/// Only the scheduler in [`crate::review::algorithm`] produces new values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    /// Absent or in the past means the item is due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    /// 0 (new) to 5 (mastered)
    #[serde(default)]
    pub mastery_level: u8,
    /// Current interval in days
    #[serde(default = "default_interval")]
    pub interval: f64,
    /// SM-2 ease factor (default 2.5)
    #[serde(default = "default_ease_factor")]
    pub ease_factor: f64,
    /// Consecutive successful reviews
    #[serde(default)]
    pub repetitions: u32,
}

fn default_interval() -> f64 {
    1.0
}

fn default_ease_factor() -> f64 {
    2.5
}

impl SrsState {
    /// State of a freshly created item, due at `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            last_reviewed_at: None,
            next_review_at: Some(now),
            mastery_level: 0,
            interval: default_interval(),
            ease_factor: default_ease_factor(),
            repetitions: 0,
        }
    }

    /// Check if the item is due at `as_of`
    pub fn is_due(&self, as_of: DateTime<Utc>) -> bool {
        self.next_review_at.map_or(true, |next| next <= as_of)
    }
}

/// A learnable word or phrase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    pub id: Uuid,
    /// Unique key within a store
    pub word: String,
    pub definition: String,
    #[serde(default)]
    pub example_sentence: String,
    #[serde(default)]
    pub pronunciation: String,
    /// e.g. "Noun", "Verb", "Phrasal Verb"
    #[serde(default)]
    pub part_of_speech: String,
    /// e.g. 7.0, 8.5
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_score: Option<f64>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub synonyms: String,
    #[serde(default)]
    pub antonyms: String,
    #[serde(default)]
    pub collocations: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub srs: SrsState,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl VocabularyItem {
    pub fn new(word: impl Into<String>, definition: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            word: word.into(),
            definition: definition.into(),
            example_sentence: String::new(),
            pronunciation: String::new(),
            part_of_speech: String::new(),
            band_score: None,
            category: default_category(),
            notes: String::new(),
            synonyms: String::new(),
            antonyms: String::new(),
            collocations: String::new(),
            created_at: now,
            srs: SrsState::new(now),
        }
    }

    /// Builder method to set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder method to set the part of speech
    pub fn with_part_of_speech(mut self, part_of_speech: impl Into<String>) -> Self {
        self.part_of_speech = part_of_speech.into();
        self
    }

    /// Builder method to set the example sentence
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.example_sentence = example.into();
        self
    }

    /// Case-insensitive substring match on the word
    pub fn matches_search(&self, query: &str) -> bool {
        query.is_empty() || self.word.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Category selection used by practice, quizzes and listings
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    pub fn matches(&self, item: &VocabularyItem) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => item.category == *category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Only(category) => f.write_str(category),
        }
    }
}

/// "All" followed by every distinct category, sorted
pub fn category_options(items: &[VocabularyItem]) -> Vec<String> {
    let distinct: BTreeSet<&str> = items.iter().map(|i| i.category.as_str()).collect();
    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

/// Items in the category whose word contains `query`
pub fn filter_items<'a>(
    items: &'a [VocabularyItem],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a VocabularyItem> {
    items
        .iter()
        .filter(|item| category.matches(item) && item.matches_search(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-10T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_new_item_defaults() {
        let item = VocabularyItem::new("ubiquitous", "found everywhere", now());

        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.srs.repetitions, 0);
        assert_eq!(item.srs.interval, 1.0);
        assert_eq!(item.srs.ease_factor, 2.5);
        assert_eq!(item.srs.mastery_level, 0);
        assert_eq!(item.srs.next_review_at, Some(now()));
        assert!(item.srs.is_due(now()));
    }

    #[test]
    fn test_category_filter() {
        let a = VocabularyItem::new("a", "x", now()).with_category("Academic");
        let b = VocabularyItem::new("b", "y", now()).with_category("Health");

        let all = CategoryFilter::parse("All");
        let academic = CategoryFilter::parse("Academic");
        assert!(all.matches(&a) && all.matches(&b));
        assert!(academic.matches(&a));
        assert!(!academic.matches(&b));
        // exact match only
        assert!(!CategoryFilter::parse("academic").matches(&a));
    }

    #[test]
    fn test_category_options_sorted_with_all_first() {
        let items = vec![
            VocabularyItem::new("a", "x", now()).with_category("Work"),
            VocabularyItem::new("b", "y", now()).with_category("Health"),
            VocabularyItem::new("c", "z", now()).with_category("Work"),
        ];

        assert_eq!(category_options(&items), vec!["All", "Health", "Work"]);
    }

    #[test]
    fn test_filter_items_by_search() {
        let items = vec![
            VocabularyItem::new("Mitigate", "make less severe", now()),
            VocabularyItem::new("Migrate", "move", now()),
            VocabularyItem::new("Abate", "lessen", now()),
        ];

        let found = filter_items(&items, &CategoryFilter::All, "mi");
        assert_eq!(found.len(), 2);
        assert_eq!(filter_items(&items, &CategoryFilter::All, "").len(), 3);
    }

    #[test]
    fn test_serde_flattens_srs_state() {
        let item = VocabularyItem::new("ubiquitous", "found everywhere", now());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["easeFactor"], 2.5);
        assert_eq!(json["masteryLevel"], 0);
        assert!(json.get("srs").is_none());

        let back: VocabularyItem = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let json = r#"{
            "id": "6f1c1f36-3d1a-4f57-a0a6-5f9e3e8b7c21",
            "word": "terse",
            "definition": "brief",
            "createdAt": "2026-03-10T09:00:00Z"
        }"#;

        let item: VocabularyItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, DEFAULT_CATEGORY);
        assert_eq!(item.srs.ease_factor, 2.5);
        assert_eq!(item.srs.interval, 1.0);
        assert!(item.srs.next_review_at.is_none());
        assert!(item.srs.is_due(now()));
    }
}
