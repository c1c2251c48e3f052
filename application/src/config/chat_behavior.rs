//! Chat behavior parameters.

use finder_domain::{DomainError, SanitizeMode, Sanitizer};

/// Controls how [`StreamChatUseCase`](crate::use_cases::stream_chat::StreamChatUseCase)
/// turns a byte stream into display text.
#[derive(Debug, Clone, Default)]
pub struct ChatBehavior {
    sanitizer: Sanitizer,
}

impl ChatBehavior {
    /// Build from a delimiter rule. Fails if `delimiter` is empty.
    pub fn new(
        delimiter: impl Into<String>,
        substitute: impl Into<String>,
        mode: SanitizeMode,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            sanitizer: Sanitizer::new(delimiter, substitute, mode)?,
        })
    }

    /// Default backtick rule in the given mode.
    pub fn with_mode(mode: SanitizeMode) -> Self {
        Self {
            sanitizer: Sanitizer::backticks(mode),
        }
    }

    pub fn mode(&self) -> SanitizeMode {
        self.sanitizer.mode()
    }

    /// Fresh sanitizer for one session.
    pub fn sanitizer(&self) -> Sanitizer {
        let mut sanitizer = self.sanitizer.clone();
        sanitizer.reset();
        sanitizer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_streaming_backticks() {
        let behavior = ChatBehavior::default();
        assert_eq!(behavior.mode(), SanitizeMode::Streaming);
        let sanitizer = behavior.sanitizer();
        assert_eq!(sanitizer.delimiter(), "```");
        assert_eq!(sanitizer.substitute(), "`");
    }

    #[test]
    fn rejects_empty_delimiter() {
        assert!(ChatBehavior::new("", "x", SanitizeMode::PerChunk).is_err());
    }

    #[test]
    fn each_sanitizer_starts_clean() {
        let behavior = ChatBehavior::default();
        let mut first = behavior.sanitizer();
        assert_eq!(first.push("tail``"), "tail");
        // The held-back "``" stays with `first`
        assert_eq!(behavior.sanitizer().finish(), "");
        assert_eq!(first.finish(), "``");
    }
}
