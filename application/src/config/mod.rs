//! Application-level configuration.
//!
//! - [`ChatBehavior`]: sanitizing rule applied to streamed replies

pub mod chat_behavior;

pub use chat_behavior::ChatBehavior;
