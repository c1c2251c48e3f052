//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
///
/// # Example
///
/// ```toml
/// [logging]
/// dir = "~/.local/state/human-finder/logs"
/// transcript = "~/.local/state/human-finder/chat.jsonl"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Directory for daily rolling log files (disabled when unset)
    pub dir: Option<String>,
    /// JSONL transcript of chat events (disabled when unset)
    pub transcript: Option<String>,
}
