//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::ConsoleFormatter;
use crate::output::formatter::OutputFormatter;
use crate::progress::reporter::ConsolePresenter;
use finder_application::{LoadRecordsUseCase, StreamChatUseCase};
use finder_domain::OutputFormat;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Slash commands understood by the REPL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    History,
    Records,
    Clear,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line starting with `/`. Returns `None` for regular prompts.
    pub fn parse(line: &str) -> Option<Self> {
        let cmd = line.trim();
        if !cmd.starts_with('/') {
            return None;
        }
        Some(match cmd {
            "/help" | "/h" | "/?" => ReplCommand::Help,
            "/history" => ReplCommand::History,
            "/records" => ReplCommand::Records,
            "/clear" => ReplCommand::Clear,
            "/quit" | "/exit" | "/q" => ReplCommand::Quit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: StreamChatUseCase,
    records: LoadRecordsUseCase,
    presenter: ConsolePresenter,
    config: ReplConfig,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(use_case: StreamChatUseCase, records: LoadRecordsUseCase) -> Self {
        Self {
            use_case,
            records,
            presenter: ConsolePresenter::new(),
            config: ReplConfig::default(),
        }
    }

    /// Apply REPL settings
    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.presenter = ConsolePresenter::new().with_progress(config.show_progress);
        self.config = config;
        self
    }

    /// Run the interactive REPL until `/quit` or Ctrl-D
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = self.line_editor();
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("chat".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let line = line.trim();

                    // Skip empty lines
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(command) = ReplCommand::parse(line) {
                        if self.handle_command(command, &mut line_editor).await {
                            break;
                        }
                        continue;
                    }

                    self.send(line).await;
                }
                Signal::CtrlC => {
                    println!("^C");
                    continue;
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }

        Ok(())
    }

    fn line_editor(&self) -> Reedline {
        let editor = Reedline::create();

        let Some(path) = self.config.history_path() else {
            return editor;
        };
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match FileBackedHistory::with_file(self.config.history_size, path.clone()) {
            Ok(history) => editor.with_history(Box::new(history)),
            Err(e) => {
                warn!("History disabled ({}): {}", path.display(), e);
                editor
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          human-finder - Chat Mode           │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show completed messages");
        println!("  /records          - Show the record table");
        println!("  /clear            - Clear the screen");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
        println!("Ctrl-C while a reply is streaming cancels it.");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    async fn handle_command(&self, command: ReplCommand, line_editor: &mut Reedline) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::History => {
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_history(self.use_case.log().entries())
                );
            }
            ReplCommand::Records => {
                let humans = self.records.execute().await;
                println!();
                print!("{}", ConsoleFormatter.render(&humans, OutputFormat::Table));
                println!();
            }
            ReplCommand::Clear => {
                if let Err(e) = line_editor.clear_screen() {
                    warn!("Could not clear screen: {}", e);
                }
            }
            ReplCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }
        false
    }

    /// Stream one reply; Ctrl-C cancels it.
    async fn send(&mut self, prompt: &str) {
        println!();

        let cancel = CancellationToken::new();
        let watcher = {
            let cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            })
        };

        // Failures are reported by the presenter; the log is untouched.
        if let Err(e) = self
            .use_case
            .send_and_stream_with_cancel(prompt, &self.presenter, &cancel)
            .await
        {
            debug!("Send ended without a reply: {}", e);
        }

        watcher.abort();
        println!();
    }
}
