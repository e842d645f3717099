use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Cancel,
    NextField,
    PrevField,
    Left,
    Right,
    Submit,
    Backspace,
    ScrollUp,
    ScrollDown,
    Input(char),
    None,
}

pub fn map_key(key: KeyEvent) -> AppAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => AppAction::Quit,
            _ => AppAction::None,
        };
    }

    match key.code {
        KeyCode::Esc => AppAction::Cancel,
        KeyCode::Tab | KeyCode::Down => AppAction::NextField,
        KeyCode::BackTab | KeyCode::Up => AppAction::PrevField,
        KeyCode::Left => AppAction::Left,
        KeyCode::Right => AppAction::Right,
        KeyCode::Enter => AppAction::Submit,
        KeyCode::Backspace => AppAction::Backspace,
        KeyCode::PageUp => AppAction::ScrollUp,
        KeyCode::PageDown => AppAction::ScrollDown,
        KeyCode::Char(ch) => AppAction::Input(ch),
        _ => AppAction::None,
    }
}
