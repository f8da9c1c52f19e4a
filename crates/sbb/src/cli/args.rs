//! Clap argument definitions for the `sbb` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sbb")]
#[command(about = "Spelling Bee Buddy - search and index puzzles and clues")]
pub struct Cli {
    /// Log more (-v for info, -vv for debug); RUST_LOG takes precedence
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared output mode flags.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sbb search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search term; several words are joined with spaces
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Page of results, starting at 1
    #[arg(short = 'p', long, default_value_t = 1)]
    pub page: u32,

    /// Print the query body built with the local analyzer instead of searching
    #[arg(long)]
    pub explain: bool,

    /// Output options.
    #[command(flatten)]
    pub output: OutputArgs,
}

impl SearchCommand {
    /// The search term as typed.
    pub fn term(&self) -> String {
        self.words.join(" ")
    }
}

/// Arguments for `sbb upsert-puzzle`.
#[derive(Args, Debug, Clone)]
pub struct UpsertPuzzleCommand {
    /// Print date, YYYY-MM-DD
    #[arg(long)]
    pub date: String,

    /// Center (required) letter
    #[arg(long)]
    pub center: String,

    /// The six outer letters
    #[arg(long)]
    pub outer: String,
}

/// Arguments for `sbb upsert-clue`.
#[derive(Args, Debug, Clone)]
pub struct UpsertClueCommand {
    /// Clue page path; derived from the clue text when omitted
    #[arg(long)]
    pub url: Option<String>,

    /// The answer word
    #[arg(long)]
    pub word: String,

    /// The clue text
    #[arg(long)]
    pub text: String,

    /// Date of the latest puzzle using this clue, YYYY-MM-DD
    #[arg(long)]
    pub date: String,
}

/// Arguments for `sbb import`.
#[derive(Args, Debug, Clone)]
pub struct ImportCommand {
    /// Scraped puzzle JSON files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

/// Arguments for `sbb init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sbb` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Search puzzles and clues
    #[command(after_help = "\
QUERY SYNTAX:
  word1 word2       Clue text near these words, closest order ranks highest
  \"phrase\"          Clue text containing this exact phrase
  December 31       Puzzles printed on this date (also '31 December 2024')
  DEFOTUX           Puzzles with exactly these seven letters, any order

EXAMPLES:
  sbb search go cold turkey
  sbb search '\"entry fee\" poker'
  sbb search 'December 31, 2024'
  sbb search --explain tuxedo")]
    Search(SearchCommand),

    /// Insert or update a puzzle document
    UpsertPuzzle(UpsertPuzzleCommand),

    /// Insert or update a clue document
    UpsertClue(UpsertClueCommand),

    /// Import scraped puzzle files
    Import(ImportCommand),

    /// Initialize sbb configuration in current directory
    Init(InitCommand),

    /// Validate configuration and diagnose issues
    Check,

    /// Show effective configuration settings
    Config,
}
