//! leaguegrid - popular football leagues in the terminal.
//!
//! Shows the popular leagues from a RapidAPI football data endpoint as a
//! responsive card grid, served from an in-memory cache that refetches
//! once the data is five minutes old.

mod app;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use leaguegrid_core::{ApiClient, Config, LeagueDataCache};

use app::{App, AppState};
use ui::input::handle_input;
use ui::render::render;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for polling terminal events (in milliseconds)
const EVENT_POLL_TIMEOUT_MS: u64 = 100;

const LOG_FILE: &str = "leaguegrid.log";

const USAGE: &str = "\
Usage: leaguegrid [OPTIONS]

Browse popular football leagues in the terminal.

Options:
      --dump-leagues  Fetch the leagues once and print them as JSON
  -h, --help          Print help
  -V, --version       Print version

Environment:
  LEAGUEGRID_URL             Popular leagues endpoint
  LEAGUEGRID_API_KEY         RapidAPI key
  LEAGUEGRID_API_HOST        RapidAPI host (defaults to the endpoint host)
  LEAGUEGRID_FRESHNESS_SECS  Cache freshness window (default 300)
  RUST_LOG                   Log filter (default warn)";

#[derive(Debug)]
enum Command {
    Run,
    DumpLeagues,
    Help,
    Version,
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args.get(1).map(String::as_str) {
        None => Ok(Command::Run),
        Some("--dump-leagues") => Ok(Command::DumpLeagues),
        Some("-h") | Some("--help") => Ok(Command::Help),
        Some("-V") | Some("--version") => Ok(Command::Version),
        Some(other) => anyhow::bail!("Unknown argument: {}\n\n{}", other, USAGE),
    }
}

fn env_filter() -> EnvFilter {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to a file while the TUI owns the terminal. The returned guard flushes
/// the writer on drop and must live until shutdown.
fn init_file_tracing(config: &Config) -> Result<WorkerGuard> {
    let log_dir = config.log_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .with(env_filter())
        .init();

    Ok(guard)
}

fn init_stderr_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    match parse_args(&args)? {
        Command::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        Command::Version => {
            println!("leaguegrid {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Command::DumpLeagues => {
            init_stderr_tracing();
            return dump_leagues().await;
        }
        Command::Run => {}
    }

    let config = Config::load()?;
    let _guard = init_file_tracing(&config)?;
    info!("leaguegrid starting");

    // Build the app before touching the terminal so config errors print normally
    let mut app = App::new(config).context("Failed to start leaguegrid")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        error!(error = %e, "UI loop failed");
        eprintln!("Error: {}", e);
    }

    info!("leaguegrid shutting down");
    Ok(())
}

/// Fetch the leagues once through the cache and print them to stdout as JSON
async fn dump_leagues() -> Result<()> {
    let config = Config::load()?;
    let settings = config.api_settings()?;
    let client = ApiClient::new(&settings)?;
    let cache = LeagueDataCache::new(Arc::new(client), config.freshness());

    eprintln!("Fetching popular leagues from {}...", settings.endpoint);
    cache.get_leagues(true).await;

    let state = cache.snapshot();
    if let Some(message) = state.error {
        anyhow::bail!(message);
    }

    let leagues = state.data.unwrap_or_default();
    eprintln!("Fetched {} leagues", leagues.len());
    println!("{}", serde_json::to_string_pretty(&leagues)?);
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick(Instant::now());

        // Draw UI
        terminal.draw(|f| {
            app.set_viewport_width(f.area().width);
            render(f, app)
        })?;

        // Poll for events with timeout to allow background updates
        if event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                // Ctrl+C to quit
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }

                if handle_input(app, key) {
                    return Ok(());
                }
            }
        }

        // Check if we should quit
        if matches!(app.state, AppState::Quitting) {
            return Ok(());
        }
    }
}
