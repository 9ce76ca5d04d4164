mod app;
mod commands;
mod prompt;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordwell-cli", about = "Spaced repetition vocabulary trainer", version)]
struct Cli {
    /// Directory holding vocabulary.json and activity.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Config file (default: <config dir>/wordwell/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Add a word to the vocabulary bank
    Add {
        word: String,
        definition: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        part_of_speech: Option<String>,
        /// Example sentence
        #[arg(long)]
        example: Option<String>,
        #[arg(long)]
        band_score: Option<f64>,
        #[arg(long)]
        pronunciation: Option<String>,
        #[arg(long)]
        synonyms: Option<String>,
        #[arg(long)]
        antonyms: Option<String>,
        #[arg(long)]
        collocations: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a word
    Delete { word: String },

    /// Import words from a CSV file with a header row
    Import { file: PathBuf },

    /// Export words as CSV (stdout when no file is given)
    Export { file: Option<PathBuf> },

    /// List words
    List {
        /// Category name, or "All"
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive word search
        #[arg(long)]
        search: Option<String>,
    },

    /// List categories with word counts
    Categories,

    /// Show words due for review
    Due {
        #[arg(long)]
        category: Option<String>,
    },

    /// Practice due words as flashcards
    Review {
        #[arg(long)]
        category: Option<String>,
    },

    /// Take a multiple-choice quiz
    Quiz {
        #[arg(long)]
        category: Option<String>,
        /// Seed for reproducible questions
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Streak, forecast and mastery overview
    Stats,

    /// Delete every word and all study progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let mut app = app::App::new(cli.data_dir.as_deref(), cli.config.as_deref())?;

    match cli.command {
        Command::Add {
            word,
            definition,
            category,
            part_of_speech,
            example,
            band_score,
            pronunciation,
            synonyms,
            antonyms,
            collocations,
            notes,
        } => {
            let fields = commands::add::NewWord {
                word,
                definition,
                category,
                part_of_speech,
                example,
                band_score,
                pronunciation,
                synonyms,
                antonyms,
                collocations,
                notes,
            };
            commands::add::run(&mut app, fields, &cli.format)?;
        }
        Command::Delete { word } => {
            commands::add::run_delete(&mut app, &word, &cli.format)?;
        }
        Command::Import { file } => {
            commands::transfer::run_import(&mut app, &file, &cli.format)?;
        }
        Command::Export { file } => {
            commands::transfer::run_export(&app, file.as_deref())?;
        }
        Command::List { category, search } => {
            commands::list::run(&app, category.as_deref(), search.as_deref(), &cli.format, use_color)?;
        }
        Command::Categories => {
            commands::list::run_categories(&app, &cli.format)?;
        }
        Command::Due { category } => {
            commands::review::run_due(&app, category.as_deref(), &cli.format, use_color)?;
        }
        Command::Review { category } => {
            commands::review::run(&mut app, category.as_deref(), use_color)?;
        }
        Command::Quiz { category, seed } => {
            commands::quiz::run(&mut app, category.as_deref(), seed, &cli.format, use_color)?;
        }
        Command::Stats => {
            commands::stats::run(&app, &cli.format, use_color)?;
        }
        Command::Reset { yes } => {
            commands::reset::run(&mut app, yes, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    use std::io::IsTerminal;
    std::io::stdout().is_terminal()
}
