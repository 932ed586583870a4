//! journal-cli - Command-line front end for the mood journal
//!
//! ```text
//! journal-cli add "tired but proud of today"
//! journal-cli summary -n 5
//! journal-cli analyze "so done with this week"
//! ```
//!
//! Shares configuration, root folder, and journal file with the server.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use journal_ai::bootstrap::Startup;
use journal_ai::types::{AnalysisResult, MoodTags};
use journal_common::journal::{JournalEntry, DEFAULT_RECENT_COUNT};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const NO_TEXT_MESSAGE: &str = "Error: No entry text provided.";

#[derive(Parser, Debug)]
#[command(name = "journal-cli")]
#[command(about = "AI-powered mood journal")]
#[command(version)]
struct Cli {
    /// Path to TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Root folder holding the journal and corpus data
    #[arg(short, long, global = true)]
    root_folder: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse an entry and save it to the journal
    Add {
        /// Journal text
        text: Option<String>,
    },
    /// Show the most recent entries
    Summary {
        /// Number of entries to show
        #[arg(short, long, default_value_t = DEFAULT_RECENT_COUNT)]
        n: usize,
    },
    /// Analyse an entry without saving it
    Analyze {
        /// Journal text
        text: Option<String>,
    },
}

fn format_tags(heading: &str, tags: &MoodTags) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}:", heading);
    let _ = writeln!(out, "  Sentiment : {}", tags.sentiment);
    let _ = writeln!(out, "  Emotion   : {}", tags.emotion);
    let _ = writeln!(out, "  Stress    : {}", tags.stress);
    let _ = writeln!(out, "  Energy    : {}", tags.energy);
    out
}

fn format_summary(entries: &[JournalEntry]) -> String {
    if entries.is_empty() {
        return "No entries available.\n".to_string();
    }

    let mut out = String::from("\nLast Journal Entries:\n\n");
    for entry in entries {
        let _ = writeln!(out, "- {}", entry.timestamp);
        let _ = writeln!(out, "  Text     : {}", entry.text);
        let _ = writeln!(out, "  Sentiment: {}", entry.tags.sentiment);
        let _ = writeln!(out, "  Emotion  : {}", entry.tags.emotion);
        let _ = writeln!(out, "  Stress   : {}", entry.tags.stress);
        let _ = writeln!(out, "  Energy   : {}\n", entry.tags.energy);
    }
    out
}

fn has_text(text: &Option<String>) -> bool {
    text.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout for results; diagnostics only on request
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let startup = Startup::load(cli.config.as_deref(), cli.root_folder.as_deref())?;

    match cli.command {
        Command::Summary { n } => {
            let entries = startup.journal().last(n).await?;
            print!("{}", format_summary(&entries));
        }
        Command::Add { text } | Command::Analyze { text } if !has_text(&text) => {
            println!("{}", NO_TEXT_MESSAGE);
        }
        Command::Add { text } => {
            let text = text.unwrap_or_default();
            let tagger = startup.tagger().await?;
            match tagger.analyze(&text).await? {
                AnalysisResult::Tags(tags) => {
                    let entry = JournalEntry {
                        timestamp: startup.clock()?.stamp(),
                        text,
                        tags,
                    };
                    startup.journal().append(entry.clone()).await?;
                    println!("{}", format_tags("Saved entry with tags", &entry.tags));
                }
                AnalysisResult::Rejected { .. } => println!("{}", NO_TEXT_MESSAGE),
            }
        }
        Command::Analyze { text } => {
            let tagger = startup.tagger().await?;
            match tagger.analyze(text.as_deref().unwrap_or_default()).await? {
                AnalysisResult::Tags(tags) => println!("{}", format_tags("Tags", &tags)),
                AnalysisResult::Rejected { .. } => println!("{}", NO_TEXT_MESSAGE),
            }
        }
    }

    Ok(())
}
