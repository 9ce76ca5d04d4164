mod file_storage;

pub use file_storage::{FileStorage, Result, StorageError};

use crate::activity::ActivityRecord;
use crate::vocab::VocabularyItem;

/// Keyed store of vocabulary items and activity records
///
/// The engines never call this themselves; callers fetch snapshots, run the
/// engines, then write the returned mutations back and `save`.
pub trait VocabStore {
    fn fetch_all(&self) -> Result<Vec<VocabularyItem>>;

    fn fetch_activity(&self) -> Result<Vec<ActivityRecord>>;

    /// Add a new item; fails if the word is already stored
    fn insert_item(&mut self, item: VocabularyItem) -> Result<()>;

    /// Replace a stored item, matched by id
    fn update_item(&mut self, item: &VocabularyItem) -> Result<()>;

    fn delete_item(&mut self, word: &str) -> Result<VocabularyItem>;

    /// Remove every item and activity record; returns how many items went
    fn clear(&mut self) -> Result<usize>;

    /// Insert or replace the record for its `(date, type)` key
    fn put_record(&mut self, record: ActivityRecord) -> Result<()>;

    /// Persist pending changes
    fn save(&mut self) -> Result<()>;
}
