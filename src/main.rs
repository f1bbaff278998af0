//! Hospital Labs TUI - Terminal User Interface for requesting lab work
//!
//! A Ratatui-based TUI for browsing labs and filing new lab requests
//! through the hospital service.

mod app;
mod config;
mod hospital;
mod i18n;
mod platform;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use config::TuiConfig;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use state::Route;
use std::fs::{self, File};
use std::io;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_NAME: &str = "hospital-labs-tui.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Keep the guard alive so buffered log lines are flushed on exit
    let log_guard = init_logging();

    // Optional start route, e.g. `hospital-labs-tui /labs/new`
    let initial_route = match std::env::args().nth(1) {
        Some(path) => match Route::parse(&path) {
            Some(route) => Some(route),
            None => anyhow::bail!("Unknown route: {path}"),
        },
        None => None,
    };

    // Create app before taking over the terminal so connection errors stay readable
    let mut app = App::new(initial_route).await?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        tracing::error!("Exiting after error: {err:#}");
        eprintln!("Error: {err:?}");
        drop(log_guard);
        std::process::exit(1);
    }

    Ok(())
}

/// Log to a file in the data directory; stderr when it cannot be created.
/// Writes go through a background worker so logging never blocks the key loop.
fn init_logging() -> WorkerGuard {
    let (writer, guard) = match open_log_file() {
        Some(file) => tracing_appender::non_blocking(file),
        None => tracing_appender::non_blocking(io::stderr()),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hospital_labs_tui=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();

    guard
}

fn open_log_file() -> Option<File> {
    let dir = TuiConfig::log_dir()?;
    fs::create_dir_all(&dir).ok()?;
    File::options()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))
        .ok()
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, &app.state))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key).await?;
                }
                _ => {}
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
