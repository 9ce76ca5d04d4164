use anyhow::Result;
use chrono::Duration;

use wordwell_lib::activity::{compute_forecast, heatmap, StudySummary};

use crate::app::App;
use crate::render::terminal::{paint, rule, Color};
use crate::OutputFormat;

/// Days of activity shown in the plain heatmap
const HEATMAP_DAYS: i64 = 14;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let items = app.items()?;
    let now = app.now();
    let summary = StudySummary::compute(&items, now, &app.calendar);
    let forecast = compute_forecast(&items, now, app.settings.forecast_days, &app.calendar);
    let activity = heatmap(&app.storage.activity_log());

    match format {
        OutputFormat::Json => {
            let forecast: Vec<_> = forecast
                .iter()
                .map(|(date, count)| serde_json::json!({ "date": date, "count": count }))
                .collect();
            let output = serde_json::json!({
                "summary": summary,
                "forecast": forecast,
                "activity": app.storage.activity_log().records(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", paint("Overview", Color::BOLD, use_color));
            println!("{}", rule(32));
            println!("Total words       {:>6}", summary.total_words);
            println!("Due now           {:>6}", summary.due_now);
            println!("Learned today     {:>6}", summary.learned_today);
            println!("Reviewed today    {:>6}", summary.reviewed_today);
            println!("Current streak    {:>5}d", summary.current_streak);
            println!("Longest streak    {:>5}d", summary.longest_streak);

            println!("\n{}", paint("Mastery", Color::BOLD, use_color));
            println!("{}", rule(32));
            println!("New               {:>6}", summary.mastery.new);
            println!("Learning          {:>6}", summary.mastery.learning);
            println!("Mastered          {:>6}", summary.mastery.mastered);
            println!("Mastered share    {:>5.0}%", summary.mastered_percent);

            println!("\n{}", paint("Upcoming reviews", Color::BOLD, use_color));
            println!("{}", rule(32));
            for (date, count) in &forecast {
                println!("{}  {:>4}", date.format("%a %d %b"), count);
            }

            println!("\n{}", paint("Recent activity", Color::BOLD, use_color));
            println!("{}", rule(32));
            let today = app.calendar.day_of(now);
            for offset in (0..HEATMAP_DAYS).rev() {
                let date = today - Duration::days(offset);
                let count = activity.get(&date).copied().unwrap_or(0);
                let bar = paint(&"\u{2588}".repeat(count.min(30) as usize), Color::GREEN, use_color);
                println!("{}  {:>4} {}", date.format("%a %d %b"), count, bar);
            }
        }
    }

    Ok(())
}
