//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod load_records;
pub mod stream_chat;
