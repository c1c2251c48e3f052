//! Interactive chat module
//!
//! Provides a line-editor based chat loop over the streaming chat use case.

mod repl;

pub use repl::{ChatRepl, ReplCommand};
