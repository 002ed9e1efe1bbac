use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};

pub(super) fn handle_detail_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Down | KeyCode::Char('j') => app.detail_scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => app.detail_scroll_up(),
        KeyCode::Char('t') => app.open_menu_picker(),
        _ => {}
    }
}
