//! Key mapping from terminal events to arcade commands.

use crate::types::{Command, InputMode};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map keyboard input to a command for the current input mode.
pub fn handle_key_event(key: KeyEvent, mode: InputMode) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key, mode) {
        return Some(Command::Quit);
    }
    match mode {
        InputMode::Navigate => navigate_key(key),
        InputMode::Text => text_key(key),
    }
}

fn navigate_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::Down),

        // Confirm / leave
        KeyCode::Enter | KeyCode::Char(' ') => Some(Command::Select),
        KeyCode::Esc => Some(Command::Back),
        KeyCode::Backspace => Some(Command::Backspace),

        KeyCode::Char(c @ '1'..='9') => Some(Command::Digit(c as u8 - b'0')),

        // Screens
        KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::Leaderboard),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Profile),
        KeyCode::Tab => Some(Command::ToggleScope),
        KeyCode::Char('/') => Some(Command::Search),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),

        _ => None,
    }
}

fn text_key(key: KeyEvent) -> Option<Command> {
    match key.code {
        KeyCode::Enter => Some(Command::Select),
        KeyCode::Esc => Some(Command::Back),
        KeyCode::Backspace => Some(Command::Backspace),
        KeyCode::Up | KeyCode::BackTab => Some(Command::Up),
        KeyCode::Down | KeyCode::Tab => Some(Command::Down),
        KeyCode::Left => Some(Command::Left),
        KeyCode::Right => Some(Command::Right),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Char(c))
        }
        _ => None,
    }
}

/// Check if key should quit the arcade. Only Ctrl-C quits while typing.
pub fn should_quit(key: KeyEvent, mode: InputMode) -> bool {
    let ctrl_c = key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    match mode {
        InputMode::Navigate => ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')),
        InputMode::Text => ctrl_c,
    }
}
