//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the record listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored table
    Table,
    /// Pretty-printed JSON array
    Json,
}

impl From<OutputFormat> for finder_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Table => finder_domain::OutputFormat::Table,
            OutputFormat::Json => finder_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for human-finder
#[derive(Parser, Debug)]
#[command(name = "human-finder")]
#[command(author, version, about = "List humans and chat with the matchmaking assistant")]
#[command(long_about = r#"
human-finder talks to two backends: a record API serving the list of humans
and a chat endpoint that streams its answers back as plain text.

Modes:
  --records          Print the record table and exit
  "<prompt>"         Send one prompt and stream the answer
  --chat             Interactive chat (Ctrl-C cancels a reply in progress)

Configuration files are loaded from (in priority order):
1. HUMAN_FINDER_* environment variables (e.g. HUMAN_FINDER_ENDPOINTS__CHAT_URL)
2. --config <path>          Explicit config file
3. ./human-finder.toml      Project-level config
4. ~/.config/human-finder/config.toml   Global config

Example:
  human-finder --records -o json
  human-finder "I have a garden and two kids, who should adopt my dog?"
  human-finder --chat --chat-url http://localhost:9001
"#)]
pub struct Cli {
    /// Prompt to send (not used in chat or records mode)
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long, conflicts_with = "records")]
    pub chat: bool,

    /// Print the record listing and exit
    #[arg(short, long)]
    pub records: bool,

    /// Record listing format (defaults to the configured format, then table)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Chat backend base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub chat_url: Option<String>,

    /// Record API base URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
