use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

pub(super) fn handle_search_key(key: KeyEvent, app: &mut App, now: Instant) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('x') if ctrl => app.search_input_clear(now),
        KeyCode::Char(c) if !ctrl => app.search_input_char(c, now),
        KeyCode::Backspace => app.search_input_backspace(now),
        KeyCode::Left => app.search_input.move_left(),
        KeyCode::Right => app.search_input.move_right(),
        KeyCode::Home => app.search_input.home(),
        KeyCode::End => app.search_input.end(),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Down => {
            if app.engine.show_suggestions() {
                app.enter_suggestions();
            } else {
                app.leave_search();
            }
        }
        KeyCode::Tab => app.leave_search(),
        KeyCode::Esc => {
            if app.engine.show_suggestions() {
                app.engine.dismiss_suggestions();
            } else {
                app.leave_search();
            }
        }
        _ => {}
    }
}
