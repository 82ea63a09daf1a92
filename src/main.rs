//! EPG TUI - a terminal TV guide.
//!
//! Fetches an EPG feed once at startup, normalizes it into channels and
//! programs, and renders a scrollable channel/time grid with the Kanagawa
//! Dragon theme. Day switching never refetches; it filters what is loaded.

mod api;
mod app;
mod config;
mod geometry;
mod grid;
mod models;
mod normalize;
mod theme;
mod timeutil;
mod ui;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use api::{ApiClient, GuideMessage};
use app::App;
use config::Config;

/// Frame rate for the spinner and input polling (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install().ok();

    let config = Config::from_env();
    run_tui(config).await
}

/// Run the TUI application
async fn run_tui(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // One fetch for the whole session
    let (api_tx, mut api_rx) = mpsc::channel::<GuideMessage>(8);
    let mut app = App::new(&config);
    let fetch_task = tokio::spawn(run_guide_fetch(config, api_tx));

    // Main event loop
    let result = run_event_loop(&mut terminal, &mut app, &mut api_rx).await;

    // Cleanup
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    fetch_task.abort();

    result
}

/// Fetch and normalize the guide once, then report the outcome
async fn run_guide_fetch(config: Config, tx: mpsc::Sender<GuideMessage>) {
    let message = match fetch_guide(&config).await {
        Ok(guide) => GuideMessage::Loaded(guide),
        Err(e) => GuideMessage::Failed(format!("{:#}", e)),
    };
    tx.send(message).await.ok();
}

async fn fetch_guide(config: &Config) -> Result<normalize::NormalizedGuide> {
    let client = ApiClient::new(config)?;
    let payload = client.fetch_guide().await?;
    normalize::normalize_guide(payload)
}

/// Run the main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    api_rx: &mut mpsc::Receiver<GuideMessage>,
) -> Result<()> {
    loop {
        // Advance the spinner
        app.tick();

        // Render the UI
        terminal.draw(|frame| ui::render(frame, app))?;

        // Check for the fetch result (non-blocking)
        while let Ok(msg) = api_rx.try_recv() {
            app.handle_api_message(msg);
        }

        // Handle input events with timeout for animation
        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
