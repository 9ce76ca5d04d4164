use anyhow::Result;

use wordwell_lib::vocab::{category_options, filter_items, CategoryFilter};

use crate::app::App;
use crate::render::terminal::{mastery_meter, paint, rule, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    category: Option<&str>,
    search: Option<&str>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let items = app.items()?;
    let filter = app.category(category);
    let mut matches = filter_items(&items, &filter, search.unwrap_or(""));
    matches.sort_by_key(|item| item.word.to_lowercase());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&matches)?);
        }
        OutputFormat::Plain => {
            if matches.is_empty() {
                println!("No words found.");
                return Ok(());
            }

            let word_width = matches
                .iter()
                .map(|i| i.word.chars().count())
                .max()
                .unwrap_or(4)
                .max(4);

            println!(
                "{:<width$}  {:<14}  {:<7}  Definition",
                "Word",
                "Category",
                "Mastery",
                width = word_width
            );
            println!("{}", rule(word_width + 40));
            for item in &matches {
                println!(
                    "{}  {:<14}  {}    {}",
                    paint(
                        &format!("{:<width$}", item.word, width = word_width),
                        Color::BOLD,
                        use_color
                    ),
                    item.category,
                    mastery_meter(item.srs.mastery_level, use_color),
                    item.definition
                );
            }
            println!("\n{} of {} words", matches.len(), items.len());
        }
    }

    Ok(())
}

/// Category options with item counts
pub fn run_categories(app: &App, format: &OutputFormat) -> Result<()> {
    let items = app.items()?;
    let counts: Vec<(String, usize)> = category_options(&items)
        .into_iter()
        .map(|name| {
            let filter = CategoryFilter::parse(&name);
            let count = items.iter().filter(|i| filter.matches(i)).count();
            (name, count)
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = counts
                .iter()
                .map(|(name, count)| serde_json::json!({ "name": name, "count": count }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for (name, count) in &counts {
                println!("{:<20} {:>5}", name, count);
            }
        }
    }

    Ok(())
}
