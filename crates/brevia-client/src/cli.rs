//! Command-line interface: summarize files or stdin via a Brevia server and
//! manage the local history record.

use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use brevia_client::{count_words, estimate_reading_time, CancelFlag, SummarizeClient};
use brevia_history::{HistoryStore, NewHistoryItem};
use brevia_summarize::{SummarizeRequest, SummaryLength, SummaryStyle};

#[derive(Parser)]
#[command(name = "brevia-cli", about = "Summarize documents via a Brevia server")]
struct Cli {
    /// Server base URL
    #[arg(long, default_value = "http://localhost:3009", global = true)]
    server: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a text file (or stdin) and stream the result to stdout
    Summarize {
        /// Input file; reads stdin when omitted
        file: Option<PathBuf>,

        /// Output shape: bullet, paragraph, key_points, executive
        #[arg(long, default_value = "paragraph")]
        style: SummaryStyle,

        /// Target verbosity: short, medium, long
        #[arg(long, default_value = "medium")]
        length: SummaryLength,

        /// Skip recording the result in history
        #[arg(long)]
        no_history: bool,
    },

    /// Manage recorded summaries
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Show recorded summaries, most recent first
    List,
    /// Delete one recorded summary by id
    Delete { id: String },
    /// Remove all recorded summaries
    Clear,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Summarize {
            file,
            style,
            length,
            no_history,
        } => summarize(&cli.server, file, style, length, no_history).await,
        Command::History { action } => history(action),
    }
}

async fn summarize(
    server: &str,
    file: Option<PathBuf>,
    style: SummaryStyle,
    length: SummaryLength,
    no_history: bool,
) -> Result<()> {
    let text = match &file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let request = SummarizeRequest {
        text: text.clone(),
        style,
        length,
    };
    let client = SummarizeClient::new(server);
    let cancel = CancelFlag::new();

    let mut summary: Option<String> = None;
    let mut failure: Option<String> = None;

    client
        .consume(
            &request,
            &cancel,
            |fragment| {
                print!("{}", fragment);
                let _ = std::io::stdout().flush();
            },
            |full| summary = Some(full),
            |err| failure = Some(err),
        )
        .await;

    if let Some(err) = failure {
        bail!(err);
    }
    println!();

    if let Some(summary) = summary {
        if !no_history {
            let store = history_store()?;
            let word_count = count_words(&summary);
            store.record(NewHistoryItem {
                input_text: text,
                summary,
                style,
                length,
                word_count,
            })?;
        }
    }

    Ok(())
}

fn history(action: HistoryAction) -> Result<()> {
    let store = history_store()?;

    match action {
        HistoryAction::List => {
            let items = store.list();
            if items.is_empty() {
                println!("No recorded summaries.");
                return Ok(());
            }
            for item in items {
                let when = chrono::DateTime::from_timestamp_millis(item.timestamp)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_default();
                println!(
                    "{}  {}  {} / {}  {} words (~{} min read)",
                    item.id,
                    when,
                    item.style.label(),
                    item.length.label(),
                    item.word_count,
                    estimate_reading_time(item.word_count),
                );
                println!("    {}", preview(&item.summary));
            }
        }
        HistoryAction::Delete { id } => {
            let remaining = store.delete(&id)?;
            println!("{} summaries remain.", remaining.len());
        }
        HistoryAction::Clear => {
            store.clear()?;
            println!("History cleared.");
        }
    }

    Ok(())
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(80) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}

/// History lives in the per-installation data directory, overridable for
/// tests and portable setups.
fn history_store() -> Result<HistoryStore> {
    let root = std::env::var("BREVIA_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("brevia")
        });
    let paths = brevia_core::DataPaths::new(root)?;
    Ok(HistoryStore::new(paths.history_file))
}
