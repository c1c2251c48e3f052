//! Chat presenter port
//!
//! Defines the render surface the streaming use case reports to.

use crate::use_cases::stream_chat::ChatError;

/// Receiver of chat state updates
///
/// Implementations live in the presentation layer. Every argument is a
/// borrowed read-only view; presenters copy what they need to keep.
///
/// The in-progress text is empty again after [`on_completed`] or
/// [`on_error`] fires.
///
/// [`on_completed`]: ChatPresenter::on_completed
/// [`on_error`]: ChatPresenter::on_error
pub trait ChatPresenter: Send + Sync {
    /// Called when a send begins; any in-progress text is cleared.
    fn on_send_start(&self, _prompt: &str) {}

    /// Called after each chunk with the full text accumulated so far.
    fn on_progress(&self, text: &str);

    /// Called once the reply is committed, with the whole message log.
    fn on_completed(&self, log: &[String]);

    /// Called when the send fails. Nothing was added to the log.
    fn on_error(&self, error: &ChatError);
}
