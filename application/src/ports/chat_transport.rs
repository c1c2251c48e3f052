//! Chat transport port
//!
//! Defines how the application layer opens a streamed chat reply.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
use thiserror::Error;

/// Errors raised before a response stream is obtained
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid response body: {0}")]
    Decode(String),
}

/// Errors raised while reading an open response stream
#[derive(Error, Debug)]
pub enum StreamError {
    #[error("Stream interrupted: {0}")]
    Interrupted(String),
}

/// Raw reply body, delivered in transport-sized chunks.
///
/// `None` from the stream means the reply completed normally.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StreamError>> + Send>>;

/// Transport for chat requests
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `prompt` and return the reply body as a byte stream.
    async fn open_chat(&self, prompt: &str) -> Result<ByteStream, TransportError>;
}
