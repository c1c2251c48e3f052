//! Chat configuration from TOML (`[chat]` section)

use super::{ConfigIssue, Severity};
use finder_application::ChatBehavior;
use finder_domain::{DEFAULT_DELIMITER, DEFAULT_SUBSTITUTE, SanitizeMode};
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
///
/// # Example
///
/// ```toml
/// [chat]
/// delimiter = "```"
/// substitute = "`"
/// mode = "streaming"   # or "per_chunk"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    /// Sequence replaced in streamed replies
    pub delimiter: String,
    /// Replacement text
    pub substitute: String,
    /// Whether delimiters split across chunks are detected
    pub mode: SanitizeMode,
}

impl Default for FileChatConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            substitute: DEFAULT_SUBSTITUTE.to_string(),
            mode: SanitizeMode::default(),
        }
    }
}

impl FileChatConfig {
    /// Convert to [`ChatBehavior`], falling back to the default rule when the
    /// configured one is unusable.
    pub fn to_behavior(&self) -> (ChatBehavior, Vec<ConfigIssue>) {
        match ChatBehavior::new(&self.delimiter, &self.substitute, self.mode) {
            Ok(behavior) => {
                let mut issues = Vec::new();
                if self.substitute.chars().count() > self.delimiter.chars().count() {
                    issues.push(ConfigIssue::new(
                        Severity::Warning,
                        "chat.substitute",
                        "chat.substitute is longer than chat.delimiter; replies will grow",
                    ));
                }
                (behavior, issues)
            }
            // The fallback rule ignores the configured substitute too
            Err(e) => {
                let issue = ConfigIssue::new(
                    Severity::Warning,
                    "chat.delimiter",
                    format!("{}, falling back to '{}'", e, DEFAULT_DELIMITER),
                );
                (ChatBehavior::with_mode(self.mode), vec![issue])
            }
        }
    }
}
