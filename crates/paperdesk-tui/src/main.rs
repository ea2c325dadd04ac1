use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

mod action;
mod app;
mod backend;
mod config_file;
mod input;
mod model;
mod theme;
mod tui_event;
mod view;

use paperdesk_api::{ApiConfig, ChatClient, IdentityStore, PaperClient, session};

use app::App;
use backend::BackendContext;

/// Browse, upload, search, and chat about your research papers from the
/// terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Backend API key
    #[arg(long)]
    api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Color theme: hacker (default) or modern
    #[arg(long)]
    theme: Option<String>,

    /// Clear the persisted session identity and start fresh
    #[arg(long)]
    reset_session: bool,
}

/// Log to a rolling file under the cache dir; a TUI can't log to stdout.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::cache_dir()?.join("paperdesk").join("logs");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::daily(dir, "paperdesk.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging();

    let file_config = config_file::load_config();
    let file_backend = file_config.backend.unwrap_or_default();
    let file_display = file_config.display.unwrap_or_default();

    // Resolve config from CLI flags > env vars > config file > defaults
    let base_url = args
        .base_url
        .or_else(|| std::env::var("PAPERDESK_API_URL").ok())
        .or(file_backend.base_url)
        .unwrap_or_else(|| "http://localhost:8000".to_string());
    let api_key = args
        .api_key
        .or_else(|| std::env::var("PAPERDESK_API_KEY").ok())
        .or(file_backend.api_key);
    let timeout_secs = args.timeout_secs.or(file_backend.timeout_secs).unwrap_or(30);

    let api_config = ApiConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        api_key,
        timeout: Duration::from_secs(timeout_secs),
    };

    // Select theme
    let theme_name = args.theme.or(file_display.theme).unwrap_or_default();
    let theme = match theme_name.as_str() {
        "modern" => theme::Theme::modern(),
        _ => theme::Theme::hacker(),
    };

    // Session identity: persisted in the data dir, ephemeral if the store is
    // unavailable.
    let store = IdentityStore::open_default();
    if args.reset_session && let Some(ref store) = store {
        store.clear()?;
    }
    let identity = match &store {
        Some(store) => store.get().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "identity store unavailable, using ephemeral identity");
            session::generate_identity()
        }),
        None => session::generate_identity(),
    };

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let mut app = App::new(identity.clone(), theme);

    // Channels between the UI thread and the network task
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let cancel = CancellationToken::new();

    app.backend_cmd_tx = Some(cmd_tx);

    let ctx = Arc::new(BackendContext {
        identity,
        papers: PaperClient::new(api_config.clone()),
        chat: ChatClient::new(api_config),
    });
    tokio::spawn(backend::run(ctx, cmd_rx, event_tx, cancel.clone()));

    // Also handle Ctrl+C at the OS level for clean shutdown
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_for_signal.cancel();
        }
    });

    // Populate the collection on mount
    app.request_refresh();

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| app.view(f))?;

        tokio::select! {
            // Backend events (non-blocking drain)
            maybe_event = event_rx.recv() => {
                if let Some(backend_event) = maybe_event {
                    app.handle_backend_event(backend_event);
                    while let Ok(evt) = event_rx.try_recv() {
                        app.handle_backend_event(evt);
                    }
                }
            }
            // Terminal input events
            _ = async {
                if event::poll(tick_rate).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        // Process tick
        app.update(action::Action::Tick);

        if app.should_quit || cancel.is_cancelled() {
            cancel.cancel();
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
