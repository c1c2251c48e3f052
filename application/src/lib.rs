//! Application layer for human-finder
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ChatBehavior;
pub use ports::{
    chat_transport::{ByteStream, ChatTransport, StreamError, TransportError},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    presenter::ChatPresenter,
    record_source::RecordSource,
};
pub use use_cases::load_records::LoadRecordsUseCase;
pub use use_cases::stream_chat::{ChatError, StreamChatUseCase};
