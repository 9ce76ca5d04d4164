//! CSV import and export of vocabulary items
//!
//! The header row decides which columns are present. Recognised names
//! (case-insensitive): `word`, `definition`, `examplesentence`,
//! `partofspeech`, `bandscore`, `category`, `synonyms`, `antonyms`,
//! `collocations`. Only `word` and `definition` are required.

use std::collections::HashSet;
use std::io;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::models::{VocabularyItem, DEFAULT_CATEGORY, DEFAULT_PART_OF_SPEECH};

const EXPORT_HEADERS: [&str; 9] = [
    "word",
    "definition",
    "exampleSentence",
    "partOfSpeech",
    "bandScore",
    "category",
    "synonyms",
    "antonyms",
    "collocations",
];

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV format: the file must include 'word' and 'definition' columns")]
    MissingHeaders,
}

pub type Result<T> = std::result::Result<T, ImportError>;

/// Outcome of an import run
#[derive(Debug, Default)]
pub struct ImportReport {
    /// New items, in file order
    pub items: Vec<VocabularyItem>,
    /// Rows with an empty word or definition
    pub skipped_incomplete: usize,
    /// Rows whose word already exists
    pub skipped_duplicate: usize,
    /// Rows the CSV reader could not decode
    pub skipped_malformed: usize,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.items.len()
    }

    pub fn skipped(&self) -> usize {
        self.skipped_incomplete + self.skipped_duplicate + self.skipped_malformed
    }
}

/// Column positions resolved from the header row
struct Columns {
    word: usize,
    definition: usize,
    example_sentence: Option<usize>,
    part_of_speech: Option<usize>,
    band_score: Option<usize>,
    category: Option<usize>,
    synonyms: Option<usize>,
    antonyms: Option<usize>,
    collocations: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|h| h == name);

        let (Some(word), Some(definition)) = (find("word"), find("definition")) else {
            return Err(ImportError::MissingHeaders);
        };

        Ok(Self {
            word,
            definition,
            example_sentence: find("examplesentence"),
            part_of_speech: find("partofspeech"),
            band_score: find("bandscore"),
            category: find("category"),
            synonyms: find("synonyms"),
            antonyms: find("antonyms"),
            collocations: find("collocations"),
        })
    }
}

/// Read an optional column from a row
fn cell<'r>(record: &'r csv::StringRecord, column: Option<usize>) -> Option<&'r str> {
    column.and_then(|idx| record.get(idx))
}

/// Parse vocabulary items from CSV
///
/// Words in `existing_words` are skipped, as are repeats within the file.
/// New items get default spaced repetition state, due at `now`.
pub fn import_csv<R: io::Read>(
    reader: R,
    existing_words: &HashSet<String>,
    now: DateTime<Utc>,
) -> Result<ImportReport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;

    let mut report = ImportReport::default();
    let mut seen: HashSet<String> = HashSet::new();

    for (row_idx, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed CSV row {}: {}", row_idx + 2, e);
                report.skipped_malformed += 1;
                continue;
            }
        };

        let word = record.get(columns.word).unwrap_or_default();
        let definition = record.get(columns.definition).unwrap_or_default();
        if word.is_empty() || definition.is_empty() {
            report.skipped_incomplete += 1;
            continue;
        }

        if existing_words.contains(word) || !seen.insert(word.to_string()) {
            log::debug!("Skipping duplicate word '{}'", word);
            report.skipped_duplicate += 1;
            continue;
        }

        let mut item = VocabularyItem::new(word, definition, now);
        item.example_sentence = cell(&record, columns.example_sentence)
            .unwrap_or_default()
            .to_string();
        item.part_of_speech = cell(&record, columns.part_of_speech)
            .unwrap_or(DEFAULT_PART_OF_SPEECH)
            .to_string();
        item.band_score = cell(&record, columns.band_score).and_then(|s| s.parse().ok());
        item.category = cell(&record, columns.category)
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string();
        item.synonyms = cell(&record, columns.synonyms).unwrap_or_default().to_string();
        item.antonyms = cell(&record, columns.antonyms).unwrap_or_default().to_string();
        item.collocations = cell(&record, columns.collocations)
            .unwrap_or_default()
            .to_string();

        report.items.push(item);
    }

    log::info!(
        "CSV import: {} new, {} skipped",
        report.imported(),
        report.skipped()
    );

    Ok(report)
}

/// Write items as CSV with every importable column
pub fn export_csv<W: io::Write>(items: &[VocabularyItem], writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(EXPORT_HEADERS)?;

    for item in items {
        let band_score = item.band_score.map(|b| b.to_string()).unwrap_or_default();
        writer.write_record([
            item.word.as_str(),
            item.definition.as_str(),
            item.example_sentence.as_str(),
            item.part_of_speech.as_str(),
            band_score.as_str(),
            item.category.as_str(),
            item.synonyms.as_str(),
            item.antonyms.as_str(),
            item.collocations.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::models::SrsState;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-03-10T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn import(content: &str) -> ImportReport {
        import_csv(content.as_bytes(), &HashSet::new(), now()).unwrap()
    }

    #[test]
    fn test_import_basic_rows() {
        let report = import(
            "Word,Definition,Category,BandScore\n\
             mitigate,make less severe,Environment,7.5\n\
             abate,become less intense,Environment,\n",
        );

        assert_eq!(report.imported(), 2);
        let first = &report.items[0];
        assert_eq!(first.word, "mitigate");
        assert_eq!(first.category, "Environment");
        assert_eq!(first.band_score, Some(7.5));
        assert_eq!(first.part_of_speech, DEFAULT_PART_OF_SPEECH);
        assert_eq!(first.srs, SrsState::new(now()));
        assert_eq!(report.items[1].band_score, None);
    }

    #[test]
    fn test_import_missing_headers() {
        let result = import_csv("word,meaning\nx,y\n".as_bytes(), &HashSet::new(), now());
        assert!(matches!(result, Err(ImportError::MissingHeaders)));
    }

    #[test]
    fn test_import_skips_incomplete_rows() {
        let report = import(
            "word,definition\n\
             ,no word\n\
             no definition,\n\
             ok,fine\n",
        );

        assert_eq!(report.imported(), 1);
        assert_eq!(report.skipped_incomplete, 2);
    }

    #[test]
    fn test_import_skips_duplicates() {
        let existing: HashSet<String> = ["mitigate".to_string()].into_iter().collect();
        let report = import_csv(
            "word,definition\n\
             mitigate,make less severe\n\
             abate,lessen\n\
             abate,lessen again\n"
                .as_bytes(),
            &existing,
            now(),
        )
        .unwrap();

        assert_eq!(report.imported(), 1);
        assert_eq!(report.items[0].definition, "lessen");
        assert_eq!(report.skipped_duplicate, 2);
    }

    #[test]
    fn test_import_quoted_fields_and_whitespace() {
        let report = import(
            "word, definition ,examplesentence\n\
             \"  pragmatic \",\"dealing with things sensibly, realistically\",\"A \"\"pragmatic\"\" choice\"\n",
        );

        let item = &report.items[0];
        assert_eq!(item.word, "pragmatic");
        assert_eq!(item.definition, "dealing with things sensibly, realistically");
        assert_eq!(item.example_sentence, "A \"pragmatic\" choice");
    }

    #[test]
    fn test_short_row_uses_defaults() {
        let report = import(
            "word,definition,partofspeech,category\n\
             brisk,quick and active\n",
        );

        let item = &report.items[0];
        assert_eq!(item.part_of_speech, DEFAULT_PART_OF_SPEECH);
        assert_eq!(item.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_export_then_import_preserves_fields() {
        let mut reviewed = VocabularyItem::new("ubiquitous", "present, appearing everywhere", now())
            .with_category("Academic")
            .with_part_of_speech("Adjective")
            .with_example("Smartphones are \"ubiquitous\".");
        reviewed.band_score = Some(8.0);
        reviewed.synonyms = "omnipresent; pervasive".to_string();
        reviewed.antonyms = "rare".to_string();
        reviewed.collocations = "ubiquitous presence".to_string();
        reviewed.srs.repetitions = 4;
        reviewed.srs.mastery_level = 3;

        let plain = VocabularyItem::new("terse", "brief", now()).with_part_of_speech("Adjective");
        let originals = vec![reviewed, plain];

        let mut buf = Vec::new();
        export_csv(&originals, &mut buf).unwrap();
        let report = import_csv(buf.as_slice(), &HashSet::new(), now()).unwrap();

        assert_eq!(report.imported(), 2);
        for (original, imported) in originals.iter().zip(&report.items) {
            assert_eq!(imported.word, original.word);
            assert_eq!(imported.definition, original.definition);
            assert_eq!(imported.example_sentence, original.example_sentence);
            assert_eq!(imported.part_of_speech, original.part_of_speech);
            assert_eq!(imported.band_score, original.band_score);
            assert_eq!(imported.category, original.category);
            assert_eq!(imported.synonyms, original.synonyms);
            assert_eq!(imported.antonyms, original.antonyms);
            assert_eq!(imported.collocations, original.collocations);
            assert_eq!(imported.srs, SrsState::new(now()));
        }
    }
}
