use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(super) fn handle_picker_key(key: KeyEvent, app: &mut App) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => app.confirm_picker(),
        KeyCode::Esc => app.cancel_picker(),
        _ => {
            let Some(picker) = app.picker.as_mut() else {
                return;
            };
            match key.code {
                KeyCode::Char('x') if ctrl => picker.clear(),
                KeyCode::Char(c) if !ctrl => picker.input_char(c),
                KeyCode::Backspace => picker.backspace(),
                KeyCode::Down | KeyCode::Tab => picker.select_next(),
                KeyCode::Up | KeyCode::BackTab => picker.select_previous(),
                _ => {}
            }
        }
    }
}
