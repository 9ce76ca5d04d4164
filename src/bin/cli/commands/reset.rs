use anyhow::Result;

use wordwell_lib::storage::VocabStore;

use crate::app::App;
use crate::prompt::Prompt;
use crate::OutputFormat;

/// Delete every word and all study progress
pub fn run(app: &mut App, confirmed: bool, format: &OutputFormat) -> Result<()> {
    let total = app.items()?.len();

    if !confirmed {
        let question = format!(
            "This deletes all {} words and your study progress in {}. It cannot be undone.\nType 'yes' to continue: ",
            total,
            app.storage.base_path().display()
        );
        let answer = Prompt::stdin().ask(&question)?;
        if !is_confirmation(answer.as_deref()) {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = app.storage.clear()?;
    app.save();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "removed": removed,
                "dataDir": app.storage.base_path().to_string_lossy(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => println!("Deleted {} words and all activity.", removed),
    }

    Ok(())
}

fn is_confirmation(answer: Option<&str>) -> bool {
    matches!(answer, Some(a) if a.eq_ignore_ascii_case("yes"))
}
