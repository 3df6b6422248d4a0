//! Mention engine command-line driver
//!
//! Runs the engine against typed text without a UI:
//!   mention-cli --catalog entities.json type "Please ask @ab" --keys enter
//!   mention-cli --catalog entities.json submit "Loop in @[Abdul] please"
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mention_cli::{load_engine, parse_keys, simulate_typing, submit_text};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "mention-cli")]
#[command(about = "Drive the mention engine from the command line")]
struct Args {
    /// JSON entity catalog ({"agent": [...], "methodology": [...], "skill": [...]})
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// TOML engine settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Type text one character at a time, then press keys
    Type {
        text: String,

        /// Comma-separated keys: up, down, tab, enter, esc
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<String>,
    },
    /// Extract and strip mentions from finished text
    Submit { text: String },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let (mut mentions, catalog) = load_engine(args.config.as_deref(), args.catalog.as_deref())?;

    let output = match args.command {
        Command::Type { text, keys } => {
            let keys = parse_keys(&keys)?;
            serde_json::to_string_pretty(&simulate_typing(&mut mentions, &catalog, &text, &keys))?
        }
        Command::Submit { text } => {
            serde_json::to_string_pretty(&submit_text(&mut mentions, &catalog, &text))?
        }
    };
    println!("{output}");
    Ok(())
}
