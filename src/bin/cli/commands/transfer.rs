use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use wordwell_lib::storage::VocabStore;
use wordwell_lib::vocab::{export_csv, import_csv};

use crate::app::App;
use crate::OutputFormat;

pub fn run_import(app: &mut App, path: &Path, format: &OutputFormat) -> Result<()> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let report = import_csv(file, &app.storage.words(), app.now())
        .with_context(|| format!("Failed to import {}", path.display()))?;

    let imported = report.imported();
    for item in report.items.iter().cloned() {
        app.storage.insert_item(item)?;
    }
    if imported > 0 {
        app.save();
    }
    log::info!("Imported {} words from {:?}", imported, path);

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "imported": imported,
                "skipped": {
                    "incomplete": report.skipped_incomplete,
                    "duplicate": report.skipped_duplicate,
                    "malformed": report.skipped_malformed,
                },
                "words": report.items.iter().map(|i| i.word.as_str()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} words", imported);
            if report.skipped() > 0 {
                println!(
                    "Skipped {} rows ({} incomplete, {} duplicate, {} malformed)",
                    report.skipped(),
                    report.skipped_incomplete,
                    report.skipped_duplicate,
                    report.skipped_malformed
                );
            }
        }
    }

    Ok(())
}

/// Write all items as CSV to `path`, or to stdout
pub fn run_export(app: &App, path: Option<&Path>) -> Result<()> {
    let items = app.items()?;

    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            export_csv(&items, file)?;
            eprintln!("Exported {} words to {}", items.len(), path.display());
        }
        None => export_csv(&items, io::stdout().lock())?,
    }

    Ok(())
}
