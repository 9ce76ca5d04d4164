use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use wordwell_lib::activity::ActivityKind;
use wordwell_lib::quiz::{QuizSession, QuizState, MIN_POOL_SIZE};
use wordwell_lib::storage::VocabStore;

use crate::app::App;
use crate::prompt::Prompt;
use crate::render::terminal::{paint, rule, Color};
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    category: Option<&str>,
    seed: Option<u64>,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let items = app.items()?;
    let filter = app.category(category);

    let quiz = match seed {
        Some(seed) => QuizSession::with_rng(StdRng::seed_from_u64(seed), app.calendar),
        None => QuizSession::new(app.calendar),
    };
    let mut quiz = quiz.with_question_limit(app.settings.quiz_length);

    if !quiz.start(&items, &filter) {
        bail!(
            "A quiz needs at least {} words in category '{}'",
            MIN_POOL_SIZE,
            filter
        );
    }

    let mut activity = app.storage.activity_log();
    let mut prompt = Prompt::stdin();

    while let Some(question) = quiz.current_question().cloned() {
        println!("{}", rule(40));
        println!(
            "{}  {}",
            paint(
                &format!("Question {}/{}", quiz.questions_asked(), quiz.question_limit()),
                Color::GRAY,
                use_color
            ),
            paint(&format!("Score {}", quiz.score()), Color::GRAY, use_color)
        );
        println!("{}\n", paint(&question.word, Color::BOLD, use_color));
        for (i, text) in question.option_texts().iter().enumerate() {
            println!("  {}. {}", i + 1, text);
        }

        let Some(choice) = prompt.ask_choice(question.options.len())? else {
            break;
        };

        let now = app.now();
        let Some(outcome) = quiz.submit_answer(choice, now, &mut activity) else {
            continue;
        };

        if outcome.correct {
            println!("{}", paint("Correct!", Color::GREEN, use_color));
        } else {
            println!(
                "{} The answer was {}. {}",
                paint("Wrong.", Color::RED, use_color),
                outcome.correct_index + 1,
                question.definition
            );
        }

        if let Some(record) = activity.get(app.calendar.day_of(now), ActivityKind::Quiz) {
            app.storage.put_record(record)?;
            app.save();
        }
    }

    let summary = quiz.summary();
    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "summary": summary,
                "percentage": summary.percentage(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}", rule(40));
            let heading = if summary.state == QuizState::Complete {
                "Quiz complete"
            } else {
                "Quiz stopped"
            };
            println!(
                "{}: {} correct ({:.0}%)",
                heading,
                summary.score,
                summary.percentage()
            );

            if !summary.incorrect_attempts.is_empty() {
                println!("\nTo review:");
                for attempt in &summary.incorrect_attempts {
                    println!(
                        "  {}: {}",
                        paint(&attempt.word, Color::BOLD, use_color),
                        attempt.definition
                    );
                    println!(
                        "    {}",
                        paint(&format!("you answered: {}", attempt.chosen_answer), Color::DIM, use_color)
                    );
                }
            }
        }
    }

    Ok(())
}
