//! JSON file store
//!
//! Directory structure:
//! ```text
//! {data-dir}/
//! ├── vocabulary.json   # Array of all vocabulary items
//! └── activity.json     # Array of daily activity records
//! ```
//!
//! Both files are read once on open and kept in memory; `save` rewrites them.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::VocabStore;
use crate::activity::{ActivityLog, ActivityRecord};
use crate::vocab::VocabularyItem;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("Word already exists: {0}")]
    DuplicateWord(String),

    #[error("Word not found: {0}")]
    WordNotFound(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

pub struct FileStorage {
    base_path: PathBuf,
    items: Vec<VocabularyItem>,
    activity: ActivityLog,
    dirty: bool,
}

impl FileStorage {
    /// Open (creating if needed) the store in `base_path`
    pub fn open(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_path)?;

        let items: Vec<VocabularyItem> = read_json_array(&base_path.join("vocabulary.json"))?;
        let records: Vec<ActivityRecord> = read_json_array(&base_path.join("activity.json"))?;

        log::debug!(
            "Opened store at {:?}: {} items, {} activity records",
            base_path,
            items.len(),
            records.len()
        );

        Ok(Self {
            base_path,
            items,
            activity: ActivityLog::from_records(records),
            dirty: false,
        })
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("wordwell"))
            .ok_or(StorageError::DataDirNotFound)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn items_path(&self) -> PathBuf {
        self.base_path.join("vocabulary.json")
    }

    fn activity_path(&self) -> PathBuf {
        self.base_path.join("activity.json")
    }

    /// Whether there are unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Every stored word, for duplicate checks during import
    pub fn words(&self) -> HashSet<String> {
        self.items.iter().map(|i| i.word.clone()).collect()
    }

    pub fn get_item(&self, word: &str) -> Result<&VocabularyItem> {
        self.items
            .iter()
            .find(|i| i.word == word)
            .ok_or_else(|| StorageError::WordNotFound(word.to_string()))
    }

    /// Activity records as a keyed log
    pub fn activity_log(&self) -> ActivityLog {
        self.activity.clone()
    }
}

impl VocabStore for FileStorage {
    fn fetch_all(&self) -> Result<Vec<VocabularyItem>> {
        Ok(self.items.clone())
    }

    fn fetch_activity(&self) -> Result<Vec<ActivityRecord>> {
        Ok(self.activity.records())
    }

    fn insert_item(&mut self, item: VocabularyItem) -> Result<()> {
        if self.items.iter().any(|i| i.word == item.word) {
            return Err(StorageError::DuplicateWord(item.word));
        }
        self.items.push(item);
        self.dirty = true;
        Ok(())
    }

    fn update_item(&mut self, item: &VocabularyItem) -> Result<()> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == item.id)
            .ok_or_else(|| StorageError::WordNotFound(item.word.clone()))?;

        self.items[pos] = item.clone();
        self.dirty = true;
        Ok(())
    }

    fn delete_item(&mut self, word: &str) -> Result<VocabularyItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.word == word)
            .ok_or_else(|| StorageError::WordNotFound(word.to_string()))?;

        self.dirty = true;
        Ok(self.items.remove(pos))
    }

    fn clear(&mut self) -> Result<usize> {
        let removed = self.items.len();
        self.items.clear();
        self.activity = ActivityLog::new();
        self.dirty = true;
        log::info!("Cleared {} items and all activity from {:?}", removed, self.base_path);
        Ok(removed)
    }

    fn put_record(&mut self, record: ActivityRecord) -> Result<()> {
        self.activity.upsert(record);
        self.dirty = true;
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        fs::write(self.items_path(), serde_json::to_string_pretty(&self.items)?)?;
        fs::write(
            self.activity_path(),
            serde_json::to_string_pretty(&self.activity.records())?,
        )?;
        self.dirty = false;
        Ok(())
    }
}

fn read_json_array<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&content)?)
}
