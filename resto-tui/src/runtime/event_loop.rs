use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::views::handle_key;

const FRAME_INTERVAL: Duration = Duration::from_millis(100);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    app.engine.mount();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_busy() {
            app.throbber_state.calc_next();
        }

        // Wake up in time for a pending debounce deadline.
        let timeout = app
            .engine
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
            .map_or(FRAME_INTERVAL, |until| until.min(FRAME_INTERVAL));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, Instant::now());
                }
            }
        }

        app.engine.tick(Instant::now());
        app.engine.drain();
        app.clamp_selection();

        if !app.running {
            break;
        }
    }

    app.engine.shutdown();
    Ok(())
}
