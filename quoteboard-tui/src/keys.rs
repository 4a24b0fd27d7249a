//! Keybinding definitions for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions available while browsing quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ShowRandom,
    ShowSelected,
    MoveUp,
    MoveDown,
    PrevFilter,
    NextFilter,
    OpenAddForm,
    Export,
    OpenImport,
    Sync,
    Reload,
    OpenHelp,
    Cancel,
}

/// Edits while a text form or prompt has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    Char(char),
    Backspace,
    NextField,
    Submit,
    Cancel,
}

pub fn map_key(event: KeyEvent) -> Option<Action> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::Reload),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::OpenHelp),
        KeyCode::Char(' ') | KeyCode::Char('r') => Some(Action::ShowRandom),
        KeyCode::Enter => Some(Action::ShowSelected),
        KeyCode::Char('a') | KeyCode::Char('n') => Some(Action::OpenAddForm),
        KeyCode::Char('e') => Some(Action::Export),
        KeyCode::Char('i') => Some(Action::OpenImport),
        KeyCode::Char('s') => Some(Action::Sync),
        KeyCode::Char('[') | KeyCode::Left | KeyCode::Char('h') => Some(Action::PrevFilter),
        KeyCode::Char(']') | KeyCode::Right | KeyCode::Char('l') => Some(Action::NextFilter),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::MoveUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::MoveDown),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

pub fn map_text_key(event: KeyEvent) -> Option<TextInput> {
    let KeyEvent { code, modifiers, .. } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') => Some(TextInput::Cancel),
            _ => None,
        };
    }

    match code {
        KeyCode::Char(c) => Some(TextInput::Char(c)),
        KeyCode::Backspace => Some(TextInput::Backspace),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            Some(TextInput::NextField)
        }
        KeyCode::Enter => Some(TextInput::Submit),
        KeyCode::Esc => Some(TextInput::Cancel),
        _ => None,
    }
}
