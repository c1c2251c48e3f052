//! Infrastructure layer for human-finder
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod http;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileChatConfig, FileConfig, FileEndpointsConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileReplConfig, Severity, expand_path,
};
pub use http::HttpBackend;
pub use logging::JsonlConversationLogger;
