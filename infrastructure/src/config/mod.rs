//! Configuration file loading for human-finder
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `HUMAN_FINDER_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./human-finder.toml` or `./.human-finder.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/human-finder/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_API_URL, DEFAULT_CHAT_URL, FileChatConfig, FileConfig,
    FileEndpointsConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig,
    Severity,
};
pub use loader::{ConfigLoader, expand_path};
