use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use logoslider_core::slider::Direction;

use crate::app::Mode;

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Slide(Direction),
    /// Open the link of the leftmost visible logo
    OpenFirstVisible,
    /// Left click at a screen position
    Click { column: u16, row: u16 },
    OpenSourcePicker,
    Reload,
    ShowHelp,
    PickerUp,
    PickerDown,
    PickerConfirm,
    ExitMode,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, mode: Mode) -> Action {
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return Action::Quit;
    }

    match mode {
        // Any key exits help
        Mode::Help => Action::ExitMode,
        Mode::SourcePicker { .. } => handle_picker_mode(key),
        Mode::Normal => handle_normal_mode(key),
    }
}

fn handle_normal_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('h') | KeyCode::Left => Action::Slide(Direction::Previous),
        KeyCode::Char('l') | KeyCode::Right => Action::Slide(Direction::Next),
        KeyCode::Enter | KeyCode::Char('o') => Action::OpenFirstVisible,
        KeyCode::Char('s') => Action::OpenSourcePicker,
        KeyCode::Char('r') => Action::Reload,
        KeyCode::Char('?') => Action::ShowHelp,
        _ => Action::None,
    }
}

fn handle_picker_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::PickerDown,
        KeyCode::Char('k') | KeyCode::Up => Action::PickerUp,
        KeyCode::Enter => Action::PickerConfirm,
        KeyCode::Esc | KeyCode::Char('q') => Action::ExitMode,
        _ => Action::None,
    }
}

/// Handle a mouse event; only the normal view reacts to the mouse
pub fn handle_mouse_event(mouse: MouseEvent, mode: Mode) -> Action {
    if mode != Mode::Normal {
        return Action::None;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Action::Click {
            column: mouse.column,
            row: mouse.row,
        },
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollUp => Action::Slide(Direction::Previous),
        MouseEventKind::ScrollRight | MouseEventKind::ScrollDown => Action::Slide(Direction::Next),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 7,
            row: 3,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_normal_mode_keys() {
        let normal = Mode::Normal;
        assert_eq!(
            handle_key_event(key(KeyCode::Char('h')), normal),
            Action::Slide(Direction::Previous)
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Right), normal),
            Action::Slide(Direction::Next)
        );
        assert_eq!(handle_key_event(key(KeyCode::Enter), normal), Action::OpenFirstVisible);
        assert_eq!(handle_key_event(key(KeyCode::Char('s')), normal), Action::OpenSourcePicker);
        assert_eq!(handle_key_event(key(KeyCode::Char('q')), normal), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Char('x')), normal), Action::None);
    }

    #[test]
    fn test_picker_mode_keys() {
        let picker = Mode::SourcePicker { cursor: 0 };
        assert_eq!(handle_key_event(key(KeyCode::Char('j')), picker), Action::PickerDown);
        assert_eq!(handle_key_event(key(KeyCode::Up), picker), Action::PickerUp);
        assert_eq!(handle_key_event(key(KeyCode::Enter), picker), Action::PickerConfirm);
        assert_eq!(handle_key_event(key(KeyCode::Esc), picker), Action::ExitMode);
        // Sliding is disabled while the dropdown is open
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), picker), Action::None);
    }

    #[test]
    fn test_help_and_ctrl_c() {
        assert_eq!(handle_key_event(key(KeyCode::Char('l')), Mode::Help), Action::ExitMode);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c, Mode::SourcePicker { cursor: 1 }), Action::Quit);
    }

    #[test]
    fn test_mouse_events() {
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left)), Mode::Normal),
            Action::Click { column: 7, row: 3 }
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::ScrollDown), Mode::Normal),
            Action::Slide(Direction::Next)
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left)), Mode::Help),
            Action::None
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved), Mode::Normal),
            Action::None
        );
    }
}
