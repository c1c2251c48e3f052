//! CLI entrypoint for human-finder
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use finder_application::{LoadRecordsUseCase, StreamChatUseCase};
use finder_infrastructure::{
    ConfigLoader, FileConfig, HttpBackend, JsonlConversationLogger, expand_path,
};
use finder_presentation::{
    ChatRepl, Cli, ConsoleFormatter, ConsolePresenter, OutputConfig, OutputFormatter, ReplConfig,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    let log_dir = cli
        .log_dir
        .clone()
        .or_else(|| config.logging.dir.as_deref().map(expand_path));
    let _guard = init_tracing(cli.verbose, log_dir.as_deref())?;

    info!("Starting human-finder");
    debug!("Effective configuration: {:?}", config);

    for issue in config.validate() {
        warn!("config {}: {}", issue.field, issue.message);
    }

    let output_config = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(config.output.format)
            .unwrap_or_default(),
        color: config.output.color,
    };
    output_config.apply_color();

    // === Dependency Injection ===
    let chat_url = cli.chat_url.as_deref().unwrap_or(&config.endpoints.chat_url);
    let api_url = cli.api_url.as_deref().unwrap_or(&config.endpoints.api_url);
    let backend = match config.endpoints.connect_timeout() {
        Some(timeout) => HttpBackend::with_connect_timeout(chat_url, api_url, timeout),
        None => HttpBackend::new(chat_url, api_url),
    };
    let backend = Arc::new(backend.context("Invalid endpoint configuration")?);

    let records = LoadRecordsUseCase::new(backend.clone());

    // Records mode
    if cli.records {
        let humans = records.execute().await;
        print!("{}", ConsoleFormatter.render(&humans, output_config.format));
        return Ok(ExitCode::SUCCESS);
    }

    let chat = build_chat(backend, &config);

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.as_deref().map(expand_path),
            history_size: config.repl.history_size,
        };
        ChatRepl::new(chat, records)
            .with_config(repl_config)
            .run()
            .await?;
        return Ok(ExitCode::SUCCESS);
    }

    // One-shot mode - prompt is required
    let prompt = match cli.prompt {
        Some(p) => p,
        None => bail!(
            "A prompt is required. Use --chat for interactive mode or --records to list humans."
        ),
    };

    let presenter =
        ConsolePresenter::new().with_progress(config.repl.show_progress && !cli.quiet);
    Ok(send_once(chat, &prompt, &presenter).await)
}

/// Build the chat use case, attaching the JSONL transcript when configured.
fn build_chat(backend: Arc<HttpBackend>, config: &FileConfig) -> StreamChatUseCase {
    let (behavior, _) = config.chat.to_behavior();
    let chat = StreamChatUseCase::new(backend).with_behavior(behavior);

    let Some(raw) = config.logging.transcript.as_deref() else {
        return chat;
    };
    match JsonlConversationLogger::new(expand_path(raw)) {
        Some(logger) => {
            info!("Writing chat transcript to {}", logger.path().display());
            chat.with_conversation_logger(Arc::new(logger))
        }
        None => {
            warn!("Transcript disabled: could not open {}", raw);
            chat
        }
    }
}

/// Send a single prompt. Ctrl-C cancels the reply.
///
/// Failures are already rendered by the presenter, so only the exit code
/// is returned.
async fn send_once(
    mut chat: StreamChatUseCase,
    prompt: &str,
    presenter: &ConsolePresenter,
) -> ExitCode {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = chat
        .send_and_stream_with_cancel(prompt, presenter, &cancel)
        .await;
    watcher.abort();

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if e.is_cancelled() => ExitCode::from(130),
        Err(_) => ExitCode::FAILURE,
    }
}

/// Initialize logging based on verbosity level.
///
/// Logs go to stderr so they never interleave with streamed replies on
/// stdout. With a log directory, a daily rolling file is written as well;
/// the returned guard must live until exit.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::daily(dir, "human-finder.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
