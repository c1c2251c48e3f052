//! Display-safe text transform for streamed replies.
//!
//! Every occurrence of a delimiter (three backticks by default) is replaced
//! with a shorter substitute (one backtick). The streaming mode keeps a
//! trailing partial delimiter back until the next chunk arrives, so the
//! committed text is the same no matter how the transport sliced it.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default delimiter collapsed by the sanitizer.
pub const DEFAULT_DELIMITER: &str = "```";

/// Default replacement for [`DEFAULT_DELIMITER`].
pub const DEFAULT_SUBSTITUTE: &str = "`";

/// How delimiter occurrences are found across chunk boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeMode {
    /// Carry a trailing partial delimiter into the next chunk (default).
    ///
    /// Output equals `full_text.replace(delimiter, substitute)`.
    #[default]
    Streaming,
    /// Scan each decoded chunk on its own; a delimiter split across two
    /// chunks is left untouched.
    PerChunk,
}

impl std::fmt::Display for SanitizeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SanitizeMode::Streaming => write!(f, "streaming"),
            SanitizeMode::PerChunk => write!(f, "per_chunk"),
        }
    }
}

/// Stateful delimiter substitution.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    delimiter: String,
    substitute: String,
    mode: SanitizeMode,
    carry: String,
}

impl Sanitizer {
    /// Create a sanitizer. The delimiter must not be empty.
    pub fn new(
        delimiter: impl Into<String>,
        substitute: impl Into<String>,
        mode: SanitizeMode,
    ) -> Result<Self, DomainError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(DomainError::InvalidSanitizer(
                "delimiter must not be empty".to_string(),
            ));
        }
        Ok(Self {
            delimiter,
            substitute: substitute.into(),
            mode,
            carry: String::new(),
        })
    }

    /// Backtick rule (```` ``` ```` → `` ` ``) in the given mode.
    pub fn backticks(mode: SanitizeMode) -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            substitute: DEFAULT_SUBSTITUTE.to_string(),
            mode,
            carry: String::new(),
        }
    }

    pub fn mode(&self) -> SanitizeMode {
        self.mode
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn substitute(&self) -> &str {
        &self.substitute
    }

    /// Transform the next decoded chunk and return the text that is safe to
    /// display now.
    pub fn push(&mut self, text: &str) -> String {
        match self.mode {
            SanitizeMode::PerChunk => text.replace(&self.delimiter, &self.substitute),
            SanitizeMode::Streaming => self.push_streaming(text),
        }
    }

    /// Release whatever is still carried at end of stream.
    ///
    /// A carried remainder is a strict prefix of the delimiter and is emitted
    /// verbatim.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.carry)
    }

    /// Discard carried text without emitting it.
    pub fn reset(&mut self) {
        self.carry.clear();
    }

    fn push_streaming(&mut self, text: &str) -> String {
        let mut input = std::mem::take(&mut self.carry);
        input.push_str(text);

        let mut out = String::with_capacity(input.len());
        let mut i = 0;
        while i < input.len() {
            let rest = &input[i..];
            if rest.starts_with(self.delimiter.as_str()) {
                out.push_str(&self.substitute);
                i += self.delimiter.len();
                continue;
            }
            if rest.len() < self.delimiter.len() && self.delimiter.starts_with(rest) {
                self.carry.push_str(rest);
                break;
            }
            match rest.chars().next() {
                Some(ch) => {
                    out.push(ch);
                    i += ch.len_utf8();
                }
                None => break,
            }
        }
        out
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::backticks(SanitizeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sanitizer: &mut Sanitizer, chunks: &[&str]) -> String {
        let mut out = String::new();
        for chunk in chunks {
            out.push_str(&sanitizer.push(chunk));
        }
        out.push_str(&sanitizer.finish());
        out
    }

    #[test]
    fn replaces_delimiter_within_chunk() {
        let mut s = Sanitizer::default();
        assert_eq!(run(&mut s, &["```rust\nfn main() {}\n```"]), "`rust\nfn main() {}\n`");
    }

    #[test]
    fn split_delimiter_is_merged_in_streaming_mode() {
        let mut s = Sanitizer::backticks(SanitizeMode::Streaming);
        assert_eq!(run(&mut s, &["AB``", "``CD"]), "AB``CD");
    }

    #[test]
    fn split_delimiter_is_left_alone_in_per_chunk_mode() {
        let mut s = Sanitizer::backticks(SanitizeMode::PerChunk);
        assert_eq!(run(&mut s, &["AB``", "``CD"]), "AB````CD");
    }

    #[test]
    fn streaming_matches_whole_text_replace_for_every_split() {
        let text = "a```b````c`````d``";
        let expected = text.replace("```", "`");
        for split in 0..=text.len() {
            let (head, tail) = text.split_at(split);
            let mut s = Sanitizer::default();
            assert_eq!(run(&mut s, &[head, tail]), expected, "split at {split}");
        }
    }

    #[test]
    fn streaming_matches_replace_for_single_char_chunks() {
        let text = "``` x ``` y `` z ```";
        let chunks: Vec<String> = text.chars().map(|c| c.to_string()).collect();
        let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
        let mut s = Sanitizer::default();
        assert_eq!(run(&mut s, &refs), text.replace("```", "`"));
    }

    #[test]
    fn partial_delimiter_is_held_then_flushed() {
        let mut s = Sanitizer::default();
        assert_eq!(s.push("done``"), "done");
        assert_eq!(s.carry, "``");
        assert_eq!(s.finish(), "``");
        assert_eq!(s.carry, "");
    }

    #[test]
    fn non_prefix_tail_is_not_held() {
        let mut s = Sanitizer::default();
        assert_eq!(s.push("a`b"), "a`b");
        assert_eq!(s.carry, "");
    }

    #[test]
    fn custom_rule_with_multibyte_delimiter() {
        let mut s = Sanitizer::new("…", ".", SanitizeMode::Streaming).unwrap();
        assert_eq!(run(&mut s, &["wait…", "…ok"]), "wait..ok");
    }

    #[test]
    fn overlapping_prefix_delimiter() {
        // "aab" inside "aaab": the scan skips one 'a' then matches
        let mut s = Sanitizer::new("aab", "X", SanitizeMode::Streaming).unwrap();
        assert_eq!(run(&mut s, &["aa", "ab"]), "aX");
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let result = Sanitizer::new("", "`", SanitizeMode::Streaming);
        assert!(matches!(result, Err(DomainError::InvalidSanitizer(_))));
    }

    #[test]
    fn reset_drops_carry() {
        let mut s = Sanitizer::default();
        s.push("x`");
        s.reset();
        assert_eq!(s.finish(), "");
    }

    #[test]
    fn mode_deserializes_snake_case() {
        let mode: SanitizeMode = serde_json::from_str("\"per_chunk\"").unwrap();
        assert_eq!(mode, SanitizeMode::PerChunk);
        assert_eq!(SanitizeMode::Streaming.to_string(), "streaming");
    }
}
