//! Streaming chat domain.
//!
//! - [`session::ChatSession`]: transient state of one send
//! - [`message_log::MessageLog`]: append-only list of completed replies
//! - [`decoder::Utf8ChunkDecoder`]: incremental UTF-8 decoding of byte chunks
//! - [`sanitizer::Sanitizer`]: delimiter substitution on decoded text

pub mod decoder;
pub mod message_log;
pub mod sanitizer;
pub mod session;
