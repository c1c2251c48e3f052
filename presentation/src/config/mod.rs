//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior.

use finder_domain::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Record listing format
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
        }
    }
}

impl OutputConfig {
    /// Disable ANSI colors globally when color output is turned off.
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Show the spinner while waiting for the first chunk
    pub show_progress: bool,
    /// Path to history file (`None` = `<data dir>/human-finder/history.txt`)
    pub history_file: Option<PathBuf>,
    /// Number of history entries kept
    pub history_size: usize,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            history_size: 500,
        }
    }
}

impl ReplConfig {
    /// Resolve the history file location, falling back to the platform data dir.
    pub fn history_path(&self) -> Option<PathBuf> {
        self.history_file.clone().or_else(|| {
            dirs::data_dir().map(|p| p.join("human-finder").join("history.txt"))
        })
    }
}
