//! Console presenter for streamed chat replies
//!
//! The use case reports the full text after every chunk. The terminal can
//! only append, so the presenter remembers what it already wrote and prints
//! the remaining suffix.

use colored::Colorize;
use finder_application::{ChatError, ChatPresenter};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

/// What has to be written to bring the terminal up to date.
#[derive(Debug, PartialEq, Eq)]
pub enum Delta<'a> {
    /// Nothing new
    None,
    /// Append this suffix to what is already on screen
    Append(&'a str),
    /// The new text does not extend what was printed; start a fresh line
    Rewrite(&'a str),
}

/// Compare the already printed text with the latest full text.
pub fn next_delta<'a>(printed: &str, text: &'a str) -> Delta<'a> {
    match text.strip_prefix(printed) {
        Some("") => Delta::None,
        Some(suffix) => Delta::Append(suffix),
        None => Delta::Rewrite(text),
    }
}

#[derive(Default)]
struct RenderState {
    printed: String,
    spinner: Option<ProgressBar>,
}

impl RenderState {
    fn clear_spinner(&mut self) {
        if let Some(pb) = self.spinner.take() {
            pb.finish_and_clear();
        }
    }
}

/// Renders chat progress to stdout, with a spinner on stderr while waiting
/// for the first chunk.
pub struct ConsolePresenter {
    show_progress: bool,
    state: Mutex<RenderState>,
}

impl ConsolePresenter {
    pub fn new() -> Self {
        Self {
            show_progress: true,
            state: Mutex::new(RenderState::default()),
        }
    }

    /// Set whether to show the waiting spinner
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn write_stdout(text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

impl Default for ConsolePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatPresenter for ConsolePresenter {
    fn on_send_start(&self, _prompt: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.clear_spinner();
        state.printed.clear();

        if self.show_progress {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_message("Waiting for reply...".dimmed().to_string());
            pb.enable_steady_tick(Duration::from_millis(100));
            state.spinner = Some(pb);
        }
    }

    fn on_progress(&self, text: &str) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.clear_spinner();

        match next_delta(&state.printed, text) {
            Delta::None => {}
            Delta::Append(suffix) => {
                Self::write_stdout(suffix);
                state.printed.push_str(suffix);
            }
            Delta::Rewrite(full) => {
                Self::write_stdout("\n");
                Self::write_stdout(full);
                state.printed = full.to_string();
            }
        }
    }

    fn on_completed(&self, log: &[String]) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.clear_spinner();

        if state.printed.is_empty() {
            Self::write_stdout(&"(empty reply)".dimmed().to_string());
        }
        Self::write_stdout("\n");
        tracing::debug!("Message log now holds {} entries", log.len());
        state.printed.clear();
    }

    fn on_error(&self, error: &ChatError) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.clear_spinner();

        if !state.printed.is_empty() {
            Self::write_stdout("\n");
        }
        if error.is_cancelled() {
            eprintln!("{}", "Cancelled.".yellow());
        } else {
            eprintln!("{} {}", "Error:".red().bold(), error);
        }
        state.printed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_appends_suffix() {
        assert_eq!(next_delta("Hel", "Hello"), Delta::Append("lo"));
        assert_eq!(next_delta("", "Hi"), Delta::Append("Hi"));
    }

    #[test]
    fn test_delta_none_when_unchanged() {
        assert_eq!(next_delta("Hello", "Hello"), Delta::None);
        assert_eq!(next_delta("", ""), Delta::None);
    }

    #[test]
    fn test_delta_rewrite_when_not_a_prefix() {
        assert_eq!(next_delta("Hello", "Help"), Delta::Rewrite("Help"));
    }

    #[test]
    fn test_delta_handles_multibyte_suffix() {
        assert_eq!(next_delta("caf", "café 🐱"), Delta::Append("é 🐱"));
    }

    #[test]
    fn test_presenter_tracks_printed_text() {
        let presenter = ConsolePresenter::new().with_progress(false);
        presenter.on_send_start("hi");
        presenter.on_progress("Hel");
        presenter.on_progress("Hello");
        assert_eq!(presenter.state.lock().unwrap().printed, "Hello");

        presenter.on_completed(&["Hello".to_string()]);
        assert!(presenter.state.lock().unwrap().printed.is_empty());
    }

    #[test]
    fn test_presenter_resets_after_error() {
        let presenter = ConsolePresenter::new().with_progress(false);
        presenter.on_send_start("hi");
        presenter.on_progress("partial");
        presenter.on_error(&ChatError::Cancelled);
        let state = presenter.state.lock().unwrap();
        assert!(state.printed.is_empty());
        assert!(state.spinner.is_none());
    }
}
