use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use wordwell_lib::activity::ActivityRecord;
use wordwell_lib::clock::{Calendar, Clock, SystemClock};
use wordwell_lib::config::{default_config_path, load_settings, Settings};
use wordwell_lib::storage::{FileStorage, VocabStore};
use wordwell_lib::vocab::{CategoryFilter, VocabularyItem};

/// Shared application state for CLI commands
pub struct App {
    pub settings: Settings,
    pub calendar: Calendar,
    pub storage: FileStorage,
    clock: SystemClock,
}

impl App {
    /// Load settings and open the store. `data_dir` overrides the config.
    pub fn new(data_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let settings = match config_path.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => load_settings(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => Settings::default(),
        };

        let calendar = settings.calendar().context("Invalid calendar settings")?;

        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => match settings.data_dir.clone() {
                Some(dir) => dir,
                None => FileStorage::default_data_dir().context("Failed to get data directory")?,
            },
        };

        let storage = FileStorage::open(data_dir.clone())
            .with_context(|| format!("Failed to open vocabulary store at {}", data_dir.display()))?;

        Ok(Self {
            settings,
            calendar,
            storage,
            clock: SystemClock,
        })
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Category from the command line, else the configured default
    pub fn category(&self, arg: Option<&str>) -> CategoryFilter {
        arg.map(CategoryFilter::parse)
            .unwrap_or_else(|| self.settings.category_filter())
    }

    pub fn items(&self) -> Result<Vec<VocabularyItem>> {
        self.storage.fetch_all().context("Failed to read vocabulary")
    }

    /// Write back a graded item and its activity record, then save.
    /// Save failures are reported but do not abort the session.
    pub fn persist_review(&mut self, item: &VocabularyItem, record: Option<ActivityRecord>) -> Result<()> {
        self.storage
            .update_item(item)
            .with_context(|| format!("Failed to update '{}'", item.word))?;
        if let Some(record) = record {
            self.storage.put_record(record)?;
        }
        self.save();
        Ok(())
    }

    /// Save the store, logging instead of failing
    pub fn save(&mut self) {
        if let Err(e) = self.storage.save() {
            log::error!("Failed to save vocabulary store: {}", e);
            eprintln!("Warning: changes could not be saved: {}", e);
        }
    }
}
