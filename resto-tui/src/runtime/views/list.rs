use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent};
use resto_search::FilterKind;

pub(super) fn handle_list_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('/') | KeyCode::Char('s') | KeyCode::Tab => app.focus_search(),
        KeyCode::Char('c') => app.open_picker(FilterKind::Category),
        KeyCode::Char('l') => app.open_picker(FilterKind::Locality),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
