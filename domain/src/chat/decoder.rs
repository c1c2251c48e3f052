//! Incremental UTF-8 decoding for chunked byte streams.
//!
//! A transport delivers bytes in arbitrary slices, so a multi-byte character
//! may straddle two chunks. [`Utf8ChunkDecoder`] keeps the incomplete tail of
//! one chunk and completes it with the head of the next instead of decoding
//! each chunk on its own.
//!
//! Malformed input never fails the decode: every invalid sequence becomes
//! U+FFFD and is recorded as a [`DecodeError`] for diagnostics.

use std::borrow::Cow;
use std::char::REPLACEMENT_CHARACTER;

/// A malformed byte sequence that was replaced during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeError {
    /// Offset of the first offending byte from the start of the stream.
    pub offset: usize,
    /// Number of bytes replaced by a single U+FFFD.
    pub len: usize,
}

/// Stateful UTF-8 decoder fed one chunk at a time.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    /// Incomplete trailing sequence from the previous chunk (at most 3 bytes).
    pending: Vec<u8>,
    /// Bytes already resolved into text or replacement characters.
    consumed: usize,
    errors: Vec<DecodeError>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next chunk, returning all text that is complete so far.
    ///
    /// A trailing partial character is held back and emitted by a later call
    /// to `decode` or [`finish`](Self::finish).
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let bytes: Cow<'_, [u8]> = if self.pending.is_empty() {
            Cow::Borrowed(chunk)
        } else {
            let mut joined = std::mem::take(&mut self.pending);
            joined.extend_from_slice(chunk);
            Cow::Owned(joined)
        };

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;

        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    out.push_str(valid);
                    self.consumed += rest.len();
                    break;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&rest[..valid_up_to]) {
                        out.push_str(valid);
                    }
                    self.consumed += valid_up_to;

                    match e.error_len() {
                        Some(len) => {
                            self.errors.push(DecodeError {
                                offset: self.consumed,
                                len,
                            });
                            out.push(REPLACEMENT_CHARACTER);
                            self.consumed += len;
                            rest = &rest[valid_up_to + len..];
                        }
                        None => {
                            // Unexpected end of input: the character continues
                            // in the next chunk.
                            self.pending.extend_from_slice(&rest[valid_up_to..]);
                            break;
                        }
                    }
                }
            }
        }

        out
    }

    /// Flush the decoder at end of stream.
    ///
    /// An incomplete trailing sequence can no longer be completed and is
    /// emitted as a single U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let len = self.pending.len();
        self.errors.push(DecodeError {
            offset: self.consumed,
            len,
        });
        self.consumed += len;
        self.pending.clear();
        REPLACEMENT_CHARACTER.to_string()
    }

    /// Replacements made so far.
    pub fn errors(&self) -> &[DecodeError] {
        &self.errors
    }
}
