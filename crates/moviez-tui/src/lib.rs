//! Terminal movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. Fetches run as tokio tasks
//! against a shared [`Catalog`] and report back over a channel.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use moviez_api::tmdb::TmdbApi;
use moviez_core::catalog::Catalog;
use moviez_core::route::Route;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::instrument;

use self::state::{AppState, BrowserSettings, Command, Delivery};

/// Event loop period.
const TICK: Duration = Duration::from_millis(50);

/// Runs the browser starting at `start` until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing or event handling fails.
/// Fetch failures are shown in the UI and never end the loop.
#[instrument(skip_all, fields(route = %start))]
pub async fn run_browser<C>(
    catalog: Arc<Catalog<C>>,
    start: Route,
    settings: BrowserSettings,
) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let mut state = AppState::new(settings);

    let result = run_event_loop(&mut terminal, &mut state, &catalog, start).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    catalog: &Arc<Catalog<C>>,
    start: Route,
) -> Result<()>
where
    C: TmdbApi + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Delivery>();
    let mut pending = state.start(start);

    loop {
        for command in pending.drain(..) {
            match command {
                Command::Fetch(ticket, request) => {
                    let catalog = Arc::clone(catalog);
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let response = catalog.execute(request).await;
                        // Receiver is gone only after quit.
                        let _ = tx.send(Delivery { ticket, response });
                    });
                }
                Command::OpenUrl(url) => {
                    if let Err(e) = open::that(&url) {
                        tracing::warn!("failed to open {url}: {e}");
                    }
                }
                Command::Quit => return Ok(()),
            }
        }

        let now = Instant::now();
        while let Ok(delivery) = rx.try_recv() {
            state.apply(delivery, now);
        }
        pending.extend(state.tick(now));

        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        if event::poll(Duration::ZERO).context("failed to poll events")?
            && let Event::Key(key) = event::read().context("failed to read event")?
            && key.kind == KeyEventKind::Press
        {
            pending.extend(state.handle_key(key.code, key.modifiers, Instant::now()));
        }

        if pending.is_empty() {
            tokio::time::sleep(TICK).await;
        }
    }
}
