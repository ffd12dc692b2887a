//! Key mapping for planview.
//!
//! Raw terminal events are decoded here into logical commands; the dashboard
//! itself never sees key codes.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use planview_engine::{Direction, InputAction};

const SCROLL_STEP: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Dashboard(InputAction),
    ScrollUp(u16),
    ScrollDown(u16),
    Resize { width: u16, height: u16 },
    Quit,
}

/// Decode `event`. Arrow keys move the prompt selection while the prompt is
/// open and scroll the reply view otherwise.
#[must_use]
pub fn map_event(event: &Event, prompting: bool) -> Option<KeyCommand> {
    match event {
        Event::Key(key) => map_key(*key, prompting),
        Event::Resize(width, height) => Some(KeyCommand::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

fn map_key(key: KeyEvent, prompting: bool) -> Option<KeyCommand> {
    if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(KeyCommand::Quit);
    }

    let command = match (key.code, prompting) {
        (KeyCode::Char('q'), _) => KeyCommand::Quit,
        (KeyCode::Up | KeyCode::Char('k'), true) => {
            KeyCommand::Dashboard(InputAction::MoveSelection(Direction::Up))
        }
        (KeyCode::Down | KeyCode::Char('j'), true) => {
            KeyCommand::Dashboard(InputAction::MoveSelection(Direction::Down))
        }
        (KeyCode::Enter, true) => KeyCommand::Dashboard(InputAction::Confirm),
        (KeyCode::Esc, true) => KeyCommand::Dashboard(InputAction::Cancel),
        (KeyCode::Char('s'), false) => KeyCommand::Dashboard(InputAction::Stop),
        (KeyCode::Up | KeyCode::Char('k'), false) => KeyCommand::ScrollUp(1),
        (KeyCode::Down | KeyCode::Char('j'), false) => KeyCommand::ScrollDown(1),
        (KeyCode::PageUp, false) => KeyCommand::ScrollUp(SCROLL_STEP),
        (KeyCode::PageDown, false) => KeyCommand::ScrollDown(SCROLL_STEP),
        _ => return None,
    };
    Some(command)
}
