//! Chat session entities
//!
//! A [`ChatSession`] lives for exactly one send: it is created when the
//! request is issued, grows while the reply streams in, and is consumed when
//! the reply is committed or the send fails.

/// Lifecycle phase of a send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// No send in flight.
    Idle,
    /// Request issued, waiting for the response stream.
    Sending,
    /// Reading the response stream.
    Streaming,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Sending => "sending",
            SessionPhase::Streaming => "streaming",
        }
    }
}

/// Transient state of one send (Entity)
#[derive(Debug)]
pub struct ChatSession {
    prompt: String,
    accumulated: String,
    phase: SessionPhase,
    chunks: usize,
}

impl ChatSession {
    /// Begin a new send. The session starts in [`SessionPhase::Sending`]
    /// with an empty buffer.
    pub fn start(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            accumulated: String::new(),
            phase: SessionPhase::Sending,
            chunks: 0,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Text accumulated so far.
    pub fn text(&self) -> &str {
        &self.accumulated
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Number of transport chunks appended so far.
    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Mark the response stream as obtained.
    pub fn begin_streaming(&mut self) {
        self.phase = SessionPhase::Streaming;
    }

    /// Append sanitized text from one chunk. The buffer only ever grows.
    pub fn append_chunk(&mut self, text: &str) {
        self.accumulated.push_str(text);
        self.chunks += 1;
    }

    /// Append text released at end of stream without counting a chunk.
    pub fn append_tail(&mut self, text: &str) {
        self.accumulated.push_str(text);
    }

    /// Close a stream that ended normally and produce the message to commit.
    pub fn finish(mut self) -> CompletedMessage {
        self.phase = SessionPhase::Idle;
        CompletedMessage {
            text: std::mem::take(&mut self.accumulated),
        }
    }

    /// Drop a session that failed, returning how many bytes were discarded.
    pub fn abandon(mut self) -> usize {
        self.phase = SessionPhase::Idle;
        self.accumulated.len()
    }
}

/// Reply text from a stream that terminated normally.
///
/// Only [`ChatSession::finish`] creates one, so the message log can never
/// receive partial text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedMessage {
    text: String,
}

impl CompletedMessage {
    pub fn into_string(self) -> String {
        self.text
    }
}
