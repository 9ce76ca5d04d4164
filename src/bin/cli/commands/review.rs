use anyhow::Result;

use wordwell_lib::activity::ActivityKind;
use wordwell_lib::review::algorithm::{format_interval, preview_intervals};
use wordwell_lib::review::{due_items_with_buffer, PracticeSession, Rating};

use crate::app::App;
use crate::prompt::Prompt;
use crate::render::terminal::{paint, render_card_back, render_card_front, rule, Color};
use crate::OutputFormat;

/// List the items that are due now
pub fn run_due(app: &App, category: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = app.items()?;
    let now = app.now();
    let due = due_items_with_buffer(&items, &app.category(category), now, app.settings.due_buffer());

    match format {
        OutputFormat::Json => {
            let output: Vec<_> = due
                .iter()
                .map(|item| {
                    serde_json::json!({
                        "word": item.word,
                        "category": item.category,
                        "masteryLevel": item.srs.mastery_level,
                        "nextReviewAt": item.srs.next_review_at,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("Nothing due. All caught up!");
                return Ok(());
            }
            for item in &due {
                let overdue = item
                    .srs
                    .next_review_at
                    .map(|next| (now - next).num_days())
                    .unwrap_or(0);
                let note = if overdue > 0 {
                    paint(&format!("{}d overdue", overdue), Color::YELLOW, use_color)
                } else {
                    String::new()
                };
                println!("  {:<24} {:<14} {}", item.word, item.category, note);
            }
            println!("\n{} due", due.len());
        }
    }

    Ok(())
}

/// Flashcard practice over the due queue
pub fn run(app: &mut App, category: Option<&str>, use_color: bool) -> Result<()> {
    let items = app.items()?;
    let queue = due_items_with_buffer(&items, &app.category(category), app.now(), app.settings.due_buffer());
    let mut session = PracticeSession::from_queue(queue, app.calendar);

    if session.is_empty() {
        println!("Nothing due. All caught up!");
        return Ok(());
    }

    let mut activity = app.storage.activity_log();
    let mut prompt = Prompt::stdin();
    let mut reviewed = 0usize;

    while let Some(item) = session.current().cloned() {
        println!("{}", rule(40));
        println!(
            "{}",
            paint(
                &format!("Card {} of {}", reviewed + 1, session.len()),
                Color::GRAY,
                use_color
            )
        );
        for line in render_card_front(&item, use_color) {
            println!("{}", line);
        }

        let Some(answer) = prompt.ask("\nPress Enter to show the answer (q to quit) ")? else {
            break;
        };
        if crate::prompt::is_quit(&answer) {
            break;
        }

        session.reveal();
        println!();
        for line in render_card_back(&item, use_color) {
            println!("{}", line);
        }

        let previews = preview_intervals(&item.srs, app.now(), &app.calendar);
        let hints: Vec<String> = Rating::ALL
            .iter()
            .zip(previews)
            .map(|(rating, days)| format!("{} {}", rating.label(), format_interval(days.floor() as i64)))
            .collect();
        println!("\n{}", paint(&hints.join("  \u{00b7}  "), Color::DIM, use_color));

        let Some(rating) = prompt.ask_rating()? else {
            break;
        };

        let now = app.now();
        if let Some(updated) = session.submit(rating.quality(), now, &mut activity) {
            let record = activity.get(app.calendar.day_of(now), ActivityKind::Flashcard);
            app.persist_review(&updated, record)?;
            reviewed += 1;
        }
    }

    println!("{}", rule(40));
    if session.is_complete() {
        println!("Session complete: {} cards reviewed.", reviewed);
    } else {
        println!("Stopped after {} cards, {} left.", reviewed, session.remaining());
    }

    Ok(())
}
