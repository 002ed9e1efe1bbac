use crate::app::{App, Focus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub(super) fn handle_suggestions_key(key: KeyEvent, app: &mut App, now: Instant) {
    match key.code {
        KeyCode::Down | KeyCode::Tab => app.suggestion_next(),
        KeyCode::Up | KeyCode::BackTab => {
            if !app.suggestion_previous() {
                app.focus = Focus::Search;
            }
        }
        KeyCode::Enter => app.confirm_suggestion(),
        KeyCode::Esc => app.hide_suggestions(),
        // Typing goes back to the input.
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.focus = Focus::Search;
            app.search_input_char(c, now);
        }
        KeyCode::Backspace => {
            app.focus = Focus::Search;
            app.search_input_backspace(now);
        }
        _ => {}
    }
}
