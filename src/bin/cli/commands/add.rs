use anyhow::{bail, Result};

use wordwell_lib::storage::{StorageError, VocabStore};
use wordwell_lib::vocab::{VocabularyItem, DEFAULT_PART_OF_SPEECH};

use crate::app::App;
use crate::OutputFormat;

/// Fields accepted by `add`
pub struct NewWord {
    pub word: String,
    pub definition: String,
    pub category: Option<String>,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
    pub band_score: Option<f64>,
    pub pronunciation: Option<String>,
    pub synonyms: Option<String>,
    pub antonyms: Option<String>,
    pub collocations: Option<String>,
    pub notes: Option<String>,
}

impl NewWord {
    fn into_item(self, app: &App) -> Result<VocabularyItem> {
        let word = self.word.trim().to_string();
        let definition = self.definition.trim().to_string();
        if word.is_empty() || definition.is_empty() {
            bail!("Word and definition must not be empty");
        }

        let mut item = VocabularyItem::new(word, definition, app.now()).with_part_of_speech(
            self.part_of_speech
                .unwrap_or_else(|| DEFAULT_PART_OF_SPEECH.to_string()),
        );
        if let Some(category) = self.category.filter(|c| !c.trim().is_empty()) {
            item = item.with_category(category.trim());
        }
        if let Some(example) = self.example {
            item = item.with_example(example);
        }
        item.band_score = self.band_score;
        item.pronunciation = self.pronunciation.unwrap_or_default();
        item.synonyms = self.synonyms.unwrap_or_default();
        item.antonyms = self.antonyms.unwrap_or_default();
        item.collocations = self.collocations.unwrap_or_default();
        item.notes = self.notes.unwrap_or_default();
        Ok(item)
    }
}

pub fn run(app: &mut App, fields: NewWord, format: &OutputFormat) -> Result<()> {
    let item = fields.into_item(app)?;

    match app.storage.insert_item(item.clone()) {
        Ok(()) => {}
        Err(StorageError::DuplicateWord(word)) => bail!("'{}' is already in the vocabulary", word),
        Err(e) => return Err(e.into()),
    }
    app.save();
    log::info!("Added '{}' to {}", item.word, item.category);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&item)?),
        OutputFormat::Plain => println!("Added \"{}\" ({})", item.word, item.category),
    }

    Ok(())
}

pub fn run_delete(app: &mut App, word: &str, format: &OutputFormat) -> Result<()> {
    let removed = match app.storage.delete_item(word) {
        Ok(item) => item,
        Err(StorageError::WordNotFound(word)) => bail!("No word '{}' in the vocabulary", word),
        Err(e) => return Err(e.into()),
    };
    app.save();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deleted": removed.word,
                "id": removed.id.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Deleted \"{}\"", removed.word),
    }

    Ok(())
}
