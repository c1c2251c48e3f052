//! Stream Chat use case.
//!
//! Sends one prompt, renders the reply while it streams in, and commits the
//! finished reply to the message log.
//!
//! # Flow
//!
//! 1. Start a [`ChatSession`] and tell the presenter to clear its
//!    in-progress text
//! 2. Open the reply stream through the [`ChatTransport`]
//! 3. For every chunk: decode, sanitize, append, report the full text
//! 4. On normal end of stream: flush decoder and sanitizer, commit to the
//!    [`MessageLog`], report the log
//!
//! Any failure (transport, stream, cancellation) abandons the session and
//! leaves the log untouched.
//!
//! Sends are sequential: [`send_and_stream`](StreamChatUseCase::send_and_stream)
//! takes `&mut self`, so a second send cannot start while one is in flight.
//! A [`CancellationToken`] is checked at every suspension point.

use crate::config::ChatBehavior;
use crate::ports::chat_transport::{ChatTransport, StreamError, TransportError};
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::presenter::ChatPresenter;
use finder_domain::core::string::truncate_str;
use finder_domain::{ChatSession, MessageLog, Utf8ChunkDecoder};
use futures::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that terminate a send without committing a message.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("Send cancelled")]
    Cancelled,
}

impl ChatError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChatError::Cancelled)
    }

    /// Short label for transcripts and status lines.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatError::Transport(_) => "transport",
            ChatError::Stream(_) => "stream",
            ChatError::Cancelled => "cancelled",
        }
    }
}

/// Counters gathered while reading one reply.
#[derive(Debug, Default)]
struct StreamStats {
    bytes: usize,
    decode_errors: usize,
}

/// The streaming message aggregator.
///
/// Owns the [`MessageLog`]; presenters only ever see borrowed views of it.
pub struct StreamChatUseCase {
    transport: Arc<dyn ChatTransport>,
    behavior: ChatBehavior,
    conversation_logger: Arc<dyn ConversationLogger>,
    log: MessageLog,
}

impl StreamChatUseCase {
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            behavior: ChatBehavior::default(),
            conversation_logger: Arc::new(NoConversationLogger),
            log: MessageLog::new(),
        }
    }

    /// Use a non-default sanitizing rule.
    pub fn with_behavior(mut self, behavior: ChatBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Completed replies, in completion order.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Send `prompt` and stream the reply to `presenter`.
    ///
    /// Returns the committed message on success.
    pub async fn send_and_stream(
        &mut self,
        prompt: &str,
        presenter: &dyn ChatPresenter,
    ) -> Result<String, ChatError> {
        self.send_and_stream_with_cancel(prompt, presenter, &CancellationToken::new())
            .await
    }

    /// Like [`send_and_stream`](Self::send_and_stream), but abandons the send
    /// as soon as `cancel` fires.
    pub async fn send_and_stream_with_cancel(
        &mut self,
        prompt: &str,
        presenter: &dyn ChatPresenter,
        cancel: &CancellationToken,
    ) -> Result<String, ChatError> {
        info!("Sending prompt: {}", truncate_str(prompt, 100));
        self.conversation_logger.log(ConversationEvent::new(
            "chat_request",
            serde_json::json!({ "prompt": prompt }),
        ));

        let mut session = ChatSession::start(prompt);
        presenter.on_send_start(prompt);

        match self.stream_reply(&mut session, presenter, cancel).await {
            Ok(stats) => {
                let chunks = session.chunk_count();
                let message = session.finish();
                let index = self.log.commit(message);
                let text = self.log.entries()[index].clone();

                info!(
                    "Reply committed: {} chunks, {} bytes, log size {}",
                    chunks,
                    stats.bytes,
                    self.log.len()
                );
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_completed",
                    serde_json::json!({
                        "text": text,
                        "bytes": stats.bytes,
                        "chunks": chunks,
                        "decode_errors": stats.decode_errors,
                    }),
                ));

                presenter.on_completed(self.log.entries());
                Ok(text)
            }
            Err(err) => {
                let phase = session.phase();
                let discarded = session.abandon();
                if err.is_cancelled() {
                    info!("Send cancelled during {}", phase.as_str());
                } else {
                    warn!(
                        "Send failed during {}: {} ({} bytes discarded)",
                        phase.as_str(),
                        err,
                        discarded
                    );
                }
                self.conversation_logger.log(ConversationEvent::new(
                    "chat_failed",
                    serde_json::json!({
                        "kind": err.kind(),
                        "error": err.to_string(),
                        "discarded_bytes": discarded,
                    }),
                ));

                presenter.on_error(&err);
                Err(err)
            }
        }
    }

    async fn stream_reply(
        &self,
        session: &mut ChatSession,
        presenter: &dyn ChatPresenter,
        cancel: &CancellationToken,
    ) -> Result<StreamStats, ChatError> {
        let mut stream = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ChatError::Cancelled),
            opened = self.transport.open_chat(session.prompt()) => opened?,
        };
        session.begin_streaming();
        debug!("Response stream opened");

        let mut decoder = Utf8ChunkDecoder::new();
        let mut sanitizer = self.behavior.sanitizer();
        debug!(
            "Replacing {:?} with {:?} ({} mode)",
            sanitizer.delimiter(),
            sanitizer.substitute(),
            sanitizer.mode()
        );
        let mut stats = StreamStats::default();

        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ChatError::Cancelled),
                next = stream.next() => next,
            };
            let Some(chunk) = next else {
                break;
            };
            let bytes = chunk?;
            stats.bytes += bytes.len();

            let text = decoder.decode(&bytes);
            let clean = sanitizer.push(&text);
            session.append_chunk(&clean);
            debug!(
                "Chunk {}: {} bytes in, {} bytes out",
                session.chunk_count(),
                bytes.len(),
                clean.len()
            );

            presenter.on_progress(session.text());
        }

        let mut tail = sanitizer.push(&decoder.finish());
        tail.push_str(&sanitizer.finish());
        if !tail.is_empty() {
            session.append_tail(&tail);
            presenter.on_progress(session.text());
        }

        stats.decode_errors = decoder.errors().len();
        if stats.decode_errors > 0 {
            warn!(
                "Replaced {} malformed byte sequence(s) in reply",
                stats.decode_errors
            );
        }

        Ok(stats)
    }
}
