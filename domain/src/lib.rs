//! Domain layer for human-finder
//!
//! This crate contains the core entities and text-processing algorithms.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Streaming chat
//!
//! A reply arrives as a stream of byte chunks. Each chunk is decoded by a
//! [`Utf8ChunkDecoder`], passed through a [`Sanitizer`], and appended to the
//! active [`ChatSession`]. When the stream ends normally the session is
//! turned into a [`CompletedMessage`] and committed to the [`MessageLog`].
//!
//! ## Records
//!
//! [`Human`] is the record type returned by the listing endpoint.

pub mod chat;
pub mod config;
pub mod core;
pub mod record;

// Re-export commonly used types
pub use chat::{
    decoder::{DecodeError, Utf8ChunkDecoder},
    message_log::MessageLog,
    sanitizer::{DEFAULT_DELIMITER, DEFAULT_SUBSTITUTE, SanitizeMode, Sanitizer},
    session::{ChatSession, CompletedMessage, SessionPhase},
};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use record::human::Human;
